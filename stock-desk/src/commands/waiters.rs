use crate::cli::WaiterAction;
use crate::desk::Desk;
use crate::utils::format::Table;
use shared::models::WaiterCreate;
use stock_client::StockApi;

pub async fn run(desk: &mut Desk, action: WaiterAction) -> anyhow::Result<()> {
    match action {
        WaiterAction::List => {
            let waiters = desk.api().list_waiters().await?;
            if waiters.is_empty() {
                println!("No waiters");
                return Ok(());
            }
            let mut table = Table::new(&["ID", "NAME"]);
            for w in &waiters {
                table.row([w.id.to_string(), w.name.clone()]);
            }
            print!("{}", table.render());
        }
        WaiterAction::Add { name } => {
            desk.api().create_waiter(&WaiterCreate { name: name.clone() }).await?;
            println!("Added waiter {}", name);
        }
        WaiterAction::Delete { id } => {
            desk.api().delete_waiter(id).await?;
            println!("Deleted waiter {}", id);
        }
    }
    Ok(())
}
