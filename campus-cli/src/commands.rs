//! Subcommand implementations.

use std::process::ExitCode;
use std::sync::Arc;

use campus_lib::CampusClient;
use campus_lib::api::Resource;
use campus_lib::error::Error;
use campus_lib::model::Admin;
use campus_lib::model::ListQuery;
use campus_lib::model::LogEntry;
use campus_lib::model::Row;
use campus_lib::model::School;
use campus_lib::model::Score;
use campus_lib::model::Student;
use campus_lib::table::BulkActionCoordinator;
use campus_lib::table::BulkMode;
use campus_lib::table::BulkOutcome;
use campus_lib::table::Column;
use campus_lib::table::FetchState;
use campus_lib::table::ListController;
use campus_lib::table::Notifier;
use campus_lib::table::TableConfig;
use campus_lib::table::TableSnapshot;
use campus_lib::table::render;
use log::info;
use serde::de::DeserializeOwned;

use crate::cli::Command;
use crate::cli::ResourceKind;

/// Prints notifications to stderr and mirrors them to the log.
struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn notify_success(&self, message: &str) {
        info!("{}", message);
        eprintln!("ok: {}", message);
    }

    fn notify_error(&self, message: &str) {
        log::error!("{}", message);
        eprintln!("error: {}", message);
    }

    fn notify_warning(&self, message: &str) {
        log::warn!("{}", message);
        eprintln!("warning: {}", message);
    }
}

/// Options of the `list` subcommand.
struct ListOptions {
    search: String,
    page: u32,
    limit: u32,
    sort: Vec<String>,
    all: bool,
}

pub async fn run(client: CampusClient, command: Command) -> Result<ExitCode, Error> {
    match command {
        Command::List {
            resource,
            search,
            page,
            limit,
            sort,
            all,
        } => {
            let options = ListOptions {
                search,
                page,
                limit,
                sort,
                all,
            };
            let resource_kind = resource;
            let resource = resource_kind.resource();
            match resource_kind {
                ResourceKind::School => list(&client, resource, School::columns(), options).await,
                ResourceKind::Student => list(&client, resource, Student::columns(), options).await,
                ResourceKind::Score => list(&client, resource, Score::columns(), options).await,
                ResourceKind::Admin => list(&client, resource, Admin::columns(), options).await,
                ResourceKind::Log => list(&client, resource, LogEntry::columns(), options).await,
            }
        }
        Command::Delete {
            resource,
            ids,
            batch,
        } => {
            let mode = if batch {
                BulkMode::Sequential
            } else {
                BulkMode::SingleOnly
            };
            let resource_kind = resource;
            let resource = resource_kind.resource();
            match resource_kind {
                ResourceKind::School => delete::<School>(&client, resource, ids, mode).await,
                ResourceKind::Student => delete::<Student>(&client, resource, ids, mode).await,
                ResourceKind::Score => delete::<Score>(&client, resource, ids, mode).await,
                ResourceKind::Admin => delete::<Admin>(&client, resource, ids, mode).await,
                ResourceKind::Log => delete::<LogEntry>(&client, resource, ids, mode).await,
            }
        }
    }
}

async fn list<T>(
    client: &CampusClient,
    resource: Resource,
    columns: Vec<Column<T>>,
    options: ListOptions,
) -> Result<ExitCode, Error>
where
    T: Row + DeserializeOwned,
{
    let config = TableConfig::new().with_page_size(options.limit);
    if !config.page_size_options.contains(&options.limit) {
        log::warn!(
            "page size {} is not one of {:?}",
            options.limit,
            config.page_size_options
        );
    }
    let query = ListQuery::new(options.limit)
        .with_search(options.search)
        .with_page(options.page);
    let controller = ListController::builder(Arc::new(client.resource::<T>(resource)))
        .columns(columns)
        .config(config)
        .label(resource.label)
        .notifier(Arc::new(StderrNotifier))
        .query(query)
        .build();
    for key in &options.sort {
        controller.set_sort(key)?;
    }

    controller.load();
    loop {
        let snapshot = controller.settled().await;
        if let FetchState::Failed(failure) = &snapshot.fetch {
            eprintln!("{}", failure);
            if failure.retryable {
                eprintln!("the failure looks temporary; run the command again");
            }
            return Ok(ExitCode::FAILURE);
        }
        print_page(controller.columns(), &snapshot, resource.label);

        if !options.all || !snapshot.pager().can_go_forward {
            break;
        }
        println!();
        controller.next_page()?;
    }
    Ok(ExitCode::SUCCESS)
}

fn print_page<T: Row>(columns: &[Column<T>], snapshot: &TableSnapshot<T>, label: &str) {
    if snapshot.is_empty_result() {
        println!("No {} data", label);
        return;
    }
    let header = render::render_header(columns, snapshot);
    let rows = render::render_rows(columns, snapshot);
    println!("{}", render::format_grid(&header, &rows));

    let pager = snapshot.pager();
    println!("page {} ({} {} records)", pager.label(), pager.total_data, label);
}

async fn delete<T>(
    client: &CampusClient,
    resource: Resource,
    ids: Vec<String>,
    mode: BulkMode,
) -> Result<ExitCode, Error>
where
    T: Row + DeserializeOwned,
{
    let remote = Arc::new(client.resource::<T>(resource));
    let notifier: Arc<dyn Notifier> = Arc::new(StderrNotifier);
    let controller = ListController::builder(remote.clone())
        .label(resource.label)
        .notifier(notifier.clone())
        .build();
    let coordinator = BulkActionCoordinator::with_mode(remote, notifier, mode).label(resource.label);

    for id in &ids {
        controller.toggle_row(id);
    }

    let outcome = coordinator.delete_selected(&controller).await;
    if refreshes(&outcome) {
        let snapshot = controller.settled().await;
        if let Some(line) = remaining_line(&snapshot, resource.label) {
            println!("{}", line);
        }
    }
    controller.shutdown();

    let code = match outcome {
        BulkOutcome::Deleted { .. } | BulkOutcome::Empty | BulkOutcome::Busy => ExitCode::SUCCESS,
        BulkOutcome::Unsupported { .. } => {
            eprintln!("pass --batch to delete several records");
            ExitCode::FAILURE
        }
        BulkOutcome::Partial { .. } | BulkOutcome::Failed { .. } => ExitCode::FAILURE,
    };
    Ok(code)
}

/// Whether the coordinator reloaded the table after `outcome`.
fn refreshes(outcome: &BulkOutcome) -> bool {
    matches!(outcome, BulkOutcome::Deleted { .. } | BulkOutcome::Partial { .. })
}

/// Summarizes the table reloaded after a delete.
fn remaining_line<T: Row>(snapshot: &TableSnapshot<T>, label: &str) -> Option<String> {
    match &snapshot.fetch {
        FetchState::Loaded(_) => Some(format!(
            "{} {} records remaining",
            snapshot.pager().total_data,
            label
        )),
        FetchState::Failed(failure) => Some(format!("could not reload {} data: {}", label, failure)),
        _ => None,
    }
}
