use crate::cli::ListAction;
use crate::context::CliContext;
use crate::output;
use basket_domain::StoredList;
use serde::Serialize;

/// A stored list together with its parsed items.
#[derive(Serialize)]
struct ListView {
    #[serde(flatten)]
    list: StoredList,
    item_names: Vec<String>,
    item_count: usize,
}

impl From<StoredList> for ListView {
    fn from(list: StoredList) -> Self {
        let item_names = list.items();
        Self {
            item_count: item_names.len(),
            item_names,
            list,
        }
    }
}

pub async fn handle(ctx: &CliContext, action: ListAction) -> anyhow::Result<()> {
    let service = ctx.service();
    match action {
        ListAction::Create {
            name,
            items,
            temporary,
        } => {
            let list = service
                .create_list(&name, items.as_deref(), temporary)
                .await?;
            output::output_success(ListView::from(list))?;
        }
        ListAction::All => {
            let summaries = service.list_summaries().await?;
            output::output_list(summaries)?;
        }
        ListAction::Recent { limit } => {
            let summaries = service.recent_lists(limit).await?;
            output::output_list(summaries)?;
        }
        ListAction::Get { id } => match service.get_list(id).await? {
            Some(list) => output::output_success(ListView::from(list))?,
            None => output::output_error(&format!("List not found: {}", id)),
        },
        ListAction::Rename { id, name } => {
            let list = service.rename_list(id, &name).await?;
            output::output_success(ListView::from(list))?;
        }
        ListAction::SetItems { id, items } => {
            let list = service.set_items(id, &items).await?;
            output::output_success(ListView::from(list))?;
        }
        ListAction::Perform { id } => {
            let list = service.mark_performed(id).await?;
            output::output_success(ListView::from(list))?;
        }
        ListAction::Delete { id } => {
            service.delete_list(id).await?;
            output::output_success(serde_json::json!({ "deleted": id }))?;
        }
    }
    Ok(())
}
