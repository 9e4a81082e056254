use crate::cli::{ShopAction, ShopSaveArgs};
use crate::context::CliContext;
use crate::output;
use basket_domain::{DisplayItem, Progress, SessionOutcome, ShoppingSession, StoredList};
use serde::Serialize;

#[derive(Serialize)]
struct SessionView<'a> {
    list: &'a StoredList,
    items: &'a [DisplayItem],
    progress: Progress,
    can_finish: bool,
}

impl<'a> SessionView<'a> {
    fn new(session: &'a ShoppingSession) -> Self {
        Self {
            list: session.list(),
            items: session.items(),
            progress: session.progress(),
            can_finish: session.can_finish(),
        }
    }
}

#[derive(Serialize)]
struct SaveView {
    #[serde(flatten)]
    outcome: SessionOutcome,
    saved: bool,
}

pub async fn handle(ctx: &CliContext, action: ShopAction) -> anyhow::Result<()> {
    match action {
        ShopAction::Show { id } => {
            let session = ctx.service().open_session(id).await?;
            output::output_success(SessionView::new(&session))?;
            session.discard();
        }
        ShopAction::Save(args) => handle_save(ctx, args).await?,
    }
    Ok(())
}

async fn handle_save(ctx: &CliContext, args: ShopSaveArgs) -> anyhow::Result<()> {
    let service = ctx.service();
    let mut session = service.open_session(args.id).await?;

    for index in args.check_index {
        session.set_completed(index, true)?;
    }
    for name in &args.check {
        session.check_by_name(name)?;
    }
    // After the named checks, so they still find unchecked items.
    if args.all {
        session.check_all();
    }

    if args.dry_run {
        let outcome = session.clone().finish()?;
        session.discard();
        return output::output_success(SaveView {
            outcome,
            saved: false,
        });
    }

    let outcome = service.save_session(session).await?;
    output::output_success(SaveView {
        outcome,
        saved: true,
    })
}
