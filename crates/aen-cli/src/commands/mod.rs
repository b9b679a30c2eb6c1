use aen_core::AenClient;
use aen_core::models::{FileTarget, SearchRequest};
use anyhow::{Context, Result};
use serde_json::json;

use crate::cli::{AppdirCommand, Cli, Commands, FileCommand, LocaleArgs, ObjectCommand};

mod support;

#[cfg(test)]
mod tests;

use self::support::{
    ensure_credentials, password_from_env, print_json, resolve_config, with_session, write_output,
};

pub(crate) fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.connection, password_from_env())?;
    ensure_credentials(&config)?;
    let mut client = AenClient::new(config).context("failed to create client")?;
    run_command(&mut client, cli.command)
}

fn run_command(client: &mut AenClient, command: Commands) -> Result<()> {
    match command {
        Commands::Ping => {
            client.login().context("login failed")?;
            let username = client.session().username.clone();
            client.logout().context("logout failed")?;
            print_json(&json!({
                "status": "ok",
                "base_url": client.config().base_url,
                "username": username,
            }))?;
        }
        Commands::Object(args) => match args.command {
            ObjectCommand::Get { id, view } => {
                let object = with_session(client, |client| client.get_object_raw(&id, view))?;
                print_json(&object)?;
            }
            ObjectCommand::Delete { id } => {
                with_session(client, |client| client.delete_object(&id))?;
                print_json(&json!({ "status": "ok", "deleted": id }))?;
            }
        },
        Commands::Search(args) => {
            let request = SearchRequest {
                q: args.query,
                view: args.view,
                attribute_names: args.attributes,
                category_ids: args.categories,
                limit: args.limit,
            };
            let hits = with_session(client, |client| client.search(&request))?;
            print_json(&hits)?;
        }
        Commands::Locales => {
            let locales = with_session(client, |client| client.get_locales())?;
            print_json(&locales)?;
        }
        Commands::Locale(LocaleArgs { set }) => match set {
            Some(tag) => {
                with_session(client, |client| client.set_locale(&tag))?;
                print_json(&json!({ "status": "ok", "locale": tag }))?;
            }
            None => {
                let locale = with_session(client, |client| client.get_locale())?;
                print_json(&json!({ "locale": locale }))?;
            }
        },
        Commands::File(args) => match args.command {
            FileCommand::List { object_id } => {
                let files = with_session(client, |client| client.list_files(&object_id))?;
                print_json(&files)?;
            }
            FileCommand::Download {
                object_id,
                filename,
                attribute,
                position,
                output,
            } => {
                let target = FileTarget {
                    attribute_name: attribute,
                    filename: None,
                    position,
                };
                let bytes = with_session(client, |client| {
                    client.download_file_content(&object_id, &filename, &target)
                })?;
                write_output(&output, &bytes)?;
                print_json(&json!({
                    "status": "ok",
                    "output": output.display().to_string(),
                    "bytes": bytes.len(),
                }))?;
            }
        },
        Commands::Appdir(args) => match args.command {
            AppdirCommand::Download {
                name,
                folder,
                output,
            } => {
                let bytes = with_session(client, |client| {
                    client.download_from_appdir(&name, folder.as_deref())
                })?;
                write_output(&output, &bytes)?;
                print_json(&json!({
                    "status": "ok",
                    "output": output.display().to_string(),
                    "bytes": bytes.len(),
                }))?;
            }
        },
    }
    Ok(())
}
