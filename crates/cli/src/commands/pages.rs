use clap::Subcommand;
use storefront_api::{forms, StorefrontApi};
use storefront_core::{
    config::LoadOptions,
    domain::content::{ContentPageDraft, PageStatus},
};

use super::{respond, with_session, CommandResult};

#[derive(Debug, Subcommand)]
pub enum PagesCommand {
    #[command(about = "List content pages")]
    List,
    #[command(about = "Show a content page by slug")]
    Show { slug: String },
    #[command(about = "Create a content page")]
    Create {
        #[arg(long)]
        slug: String,
        #[arg(long)]
        title: String,
        #[arg(long)]
        body: String,
        #[arg(long, help = "Publish immediately instead of saving a draft")]
        publish: bool,
    },
}

pub fn run(options: LoadOptions, command: PagesCommand) -> CommandResult {
    with_session("pages", options, |session| match command {
        PagesCommand::List => {
            let result = session.block_on(session.api.list_pages());
            respond("pages", result, |pages| format!("{} page(s)", pages.len()))
        }
        PagesCommand::Show { slug } => {
            let result = session.block_on(session.api.get_page(&slug));
            respond("pages", result, |page| format!("{} (/{})", page.title, page.slug))
        }
        PagesCommand::Create { slug, title, body, publish } => {
            let status = if publish { PageStatus::Published } else { PageStatus::Draft };
            let draft = ContentPageDraft { slug, title, body, status };
            let result =
                session.block_on(forms::submit_content_page(session.api.as_ref(), None, &draft));
            respond("pages", result, |page| format!("page /{} saved", page.slug))
        }
    })
}
