use crate::cli::{OrderAction, PrinterArgs};
use crate::desk::Desk;
use crate::utils::format::{Table, money};
use crate::utils::receipt_renderer::ReceiptRenderer;
use anyhow::Context;
use shared::Receipt;
use shared::types::TableId;
use stock_client::StockApi;
use stock_printer::{NetworkPrinter, Printer, encode_for_printer};
use tracing::info;

pub async fn run(desk: &mut Desk, action: OrderAction) -> anyhow::Result<()> {
    match action {
        OrderAction::List => list(desk).await,
        OrderAction::Receipt {
            table,
            print,
            settle,
            yes,
            printer,
        } => receipt(desk, table, print, settle, yes, &printer).await,
    }
}

async fn list(desk: &mut Desk) -> anyhow::Result<()> {
    let orders = desk.api().list_orders().await?;
    if orders.is_empty() {
        println!("No orders");
        return Ok(());
    }

    let mut listing = Table::new(&["ORDER", "TABLE", "ITEM", "QTY", "PRICE", "WAITER", "TIME"]);
    for o in &orders {
        listing.row([
            o.id.to_string(),
            o.table_number.map(|n| n.to_string()).unwrap_or_default(),
            o.item_name.clone().unwrap_or_default(),
            o.quantity.to_string(),
            o.price.map(money).unwrap_or_default(),
            o.waiter_name.clone().unwrap_or_default(),
            o.order_time.clone().unwrap_or_default(),
        ]);
    }
    print!("{}", listing.render());
    Ok(())
}

async fn receipt(
    desk: &mut Desk,
    table_id: TableId,
    print: bool,
    settle: bool,
    yes: bool,
    printer: &PrinterArgs,
) -> anyhow::Result<()> {
    let receipt = desk.tables().finalize_receipt(table_id).await?;

    let renderer = ReceiptRenderer::new(&receipt, printer.paper_width)
        .with_currency(&printer.currency)
        .with_charset(printer.charset);
    print!("{}", renderer.render_plain());

    if print {
        send_to_printer(&renderer, printer).await?;
        println!("Receipt sent to printer");
    }

    if settle {
        settle_receipt(desk, &receipt, yes).await?;
    }
    Ok(())
}

async fn send_to_printer(renderer: &ReceiptRenderer<'_>, args: &PrinterArgs) -> anyhow::Result<()> {
    let addr = args
        .printer
        .as_deref()
        .context("No printer configured, set STOCK_PRINTER or pass --printer")?;
    let printer = NetworkPrinter::from_addr(addr)?;

    let data = encode_for_printer(&renderer.render(), args.charset);
    printer
        .print(&data)
        .await
        .with_context(|| format!("Printing to {} failed", printer.addr()))?;
    Ok(())
}

async fn settle_receipt(desk: &mut Desk, receipt: &Receipt, yes: bool) -> anyhow::Result<()> {
    let confirmed = yes
        || desk
            .console()
            .confirm(&format!(
                "Delete all orders of table {} and clear it?",
                receipt.table_number
            ))
            .await?;
    if !confirmed {
        println!("Table left open");
        return Ok(());
    }

    desk.tables().settle_table(receipt).await?;
    info!(table_id = receipt.table_id, total = %receipt.total, "Table settled");
    println!("Table {} settled", receipt.table_number);
    Ok(())
}
