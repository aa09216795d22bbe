use clap::{Args, Parser, Subcommand};
use shared::types::{ItemId, OrderId, TableId, WaiterId};
use shared::{Decimal, JoinKey};
use std::path::PathBuf;
use stock_printer::Charset;

#[derive(Parser, Debug)]
#[command(name = "stock-desk")]
#[command(about = "Stock, waiter and table desk for a restaurant bar")]
#[command(version)]
pub struct Cli {
    /// API base URL
    #[arg(long, global = true, env = "STOCK_API_URL")]
    pub api_url: Option<String>,

    /// File holding the login token
    #[arg(long, global = true, env = "STOCK_SESSION_FILE")]
    pub session_file: Option<PathBuf>,

    /// How receipt lines are matched to prices: id, name or embedded
    #[arg(long, global = true, env = "STOCK_JOIN_KEY")]
    pub join_key: Option<JoinKey>,

    /// Log filter (e.g. warn, debug, stock_client=trace)
    #[arg(long, global = true, env = "STOCK_LOG", default_value = "warn")]
    pub log_level: String,

    /// Write logs to a daily file in this directory instead of stderr
    #[arg(long, global = true, env = "STOCK_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Log in and keep the token for later commands
    Login {
        #[arg(long, short)]
        username: Option<String>,
        #[arg(long, short, env = "STOCK_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },
    /// Forget the stored token
    Logout,
    /// Show the session state
    Whoami,
    /// Manage the item catalog
    Stock {
        #[command(subcommand)]
        action: StockAction,
    },
    /// Manage waiters
    Waiters {
        #[command(subcommand)]
        action: WaiterAction,
    },
    /// Open tabs and take orders
    Tables {
        #[command(subcommand)]
        action: TableAction,
    },
    /// Review orders and print receipts
    Orders {
        #[command(subcommand)]
        action: OrderAction,
    },
    /// Read commands from stdin, keeping the order cache between them
    Shell,
}

#[derive(Subcommand, Debug)]
pub enum StockAction {
    List,
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        quantity: u32,
        #[arg(long)]
        price: Decimal,
        #[arg(long)]
        description: Option<String>,
    },
    /// Change fields of an item; omitted fields keep their value
    Edit {
        id: ItemId,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        quantity: Option<u32>,
        #[arg(long)]
        price: Option<Decimal>,
        #[arg(long)]
        description: Option<String>,
    },
    Delete {
        id: ItemId,
    },
}

#[derive(Subcommand, Debug)]
pub enum WaiterAction {
    List,
    Add { name: String },
    Delete { id: WaiterId },
}

#[derive(Subcommand, Debug)]
pub enum TableAction {
    List,
    /// Open a tab for a waiter
    Open {
        #[arg(long)]
        number: u32,
        #[arg(long)]
        waiter: WaiterId,
    },
    AddItem {
        table: TableId,
        item: ItemId,
        #[arg(long, short, default_value_t = 1)]
        quantity: u32,
    },
    /// Active orders of a table
    Orders { table: TableId },
    DeleteOrder { order: OrderId },
    /// Mark a table cleared without deleting its orders
    Clear { table: TableId },
}

#[derive(Subcommand, Debug)]
pub enum OrderAction {
    /// Every order with its table and waiter
    List,
    /// Show a table's receipt, optionally print and settle it
    Receipt {
        table: TableId,
        /// Send the receipt to the printer
        #[arg(long)]
        print: bool,
        /// Delete the table's orders and clear it afterwards
        #[arg(long)]
        settle: bool,
        /// Settle without asking
        #[arg(long, short)]
        yes: bool,
        #[command(flatten)]
        printer: PrinterArgs,
    },
}

#[derive(Args, Debug, Clone)]
pub struct PrinterArgs {
    /// Receipt printer, "ip:port" or "ip" for port 9100
    #[arg(long, env = "STOCK_PRINTER")]
    pub printer: Option<String>,

    /// Receipt width in characters
    #[arg(long, env = "STOCK_PAPER_WIDTH", default_value_t = 48)]
    pub paper_width: usize,

    /// Currency label on the total line
    #[arg(long, env = "STOCK_CURRENCY", default_value = "NGN")]
    pub currency: String,

    /// Printer code page: windows-1252 or gbk
    #[arg(long, env = "STOCK_PRINTER_CHARSET", default_value = "windows-1252")]
    pub charset: Charset,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_receipt() {
        let cli = Cli::try_parse_from([
            "stock-desk",
            "orders",
            "receipt",
            "5",
            "--print",
            "--settle",
            "--paper-width",
            "32",
            "--join-key",
            "embedded",
        ])
        .unwrap();

        assert_eq!(cli.join_key, Some(JoinKey::Embedded));
        match cli.command {
            Command::Orders {
                action:
                    OrderAction::Receipt {
                        table,
                        print,
                        settle,
                        yes,
                        printer,
                    },
            } => {
                assert_eq!(table, 5);
                assert!(print && settle && !yes);
                assert_eq!(printer.paper_width, 32);
                assert_eq!(printer.charset, Charset::Windows1252);
            }
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_parse_add_item_and_price() {
        let cli =
            Cli::try_parse_from(["stock-desk", "tables", "add-item", "5", "1", "-q", "3"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::Tables {
                action: TableAction::AddItem {
                    table: 5,
                    item: 1,
                    quantity: 3
                }
            }
        ));

        let cli = Cli::try_parse_from([
            "stock-desk", "stock", "add", "--name", "Malt", "--quantity", "24", "--price",
            "350.50",
        ])
        .unwrap();
        match cli.command {
            Command::Stock {
                action: StockAction::Add { price, .. },
            } => assert_eq!(price, Decimal::new(35050, 2)),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_bad_join_key() {
        assert!(Cli::try_parse_from(["stock-desk", "--join-key", "sku", "whoami"]).is_err());
    }
}
