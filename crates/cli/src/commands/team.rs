use clap::Subcommand;
use storefront_api::StorefrontApi;
use storefront_core::{
    config::LoadOptions,
    domain::team::{SalesManagerId, SalesRepId},
};

use super::{respond, with_session, CommandResult};

#[derive(Debug, Subcommand)]
pub enum TeamCommand {
    #[command(about = "List sales reps")]
    Reps,
    #[command(about = "List sales managers and their reps")]
    Managers,
    #[command(about = "Assign a sales rep to a manager")]
    Assign { manager_id: String, rep_id: String },
    #[command(about = "Remove a sales rep from a manager")]
    Unassign { manager_id: String, rep_id: String },
}

pub fn run(options: LoadOptions, command: TeamCommand) -> CommandResult {
    with_session("team", options, |session| match command {
        TeamCommand::Reps => {
            let result = session.block_on(session.api.list_sales_reps());
            respond("team", result, |reps| format!("{} sales rep(s)", reps.len()))
        }
        TeamCommand::Managers => {
            let result = session.block_on(session.api.list_sales_managers());
            respond("team", result, |managers| format!("{} sales manager(s)", managers.len()))
        }
        TeamCommand::Assign { manager_id, rep_id } => {
            let rep = SalesRepId(rep_id);
            let result = session
                .block_on(session.api.assign_sales_rep(&SalesManagerId(manager_id), &rep));
            respond("team", result, |manager| {
                format!("{} now manages {} rep(s)", manager.name, manager.reps.len())
            })
        }
        TeamCommand::Unassign { manager_id, rep_id } => {
            let rep = SalesRepId(rep_id);
            let result = session
                .block_on(session.api.unassign_sales_rep(&SalesManagerId(manager_id), &rep));
            respond("team", result, |manager| {
                let verb =
                    if manager.manages(&rep) { "still manages" } else { "no longer manages" };
                format!("{} {verb} {}", manager.name, rep.0)
            })
        }
    })
}
