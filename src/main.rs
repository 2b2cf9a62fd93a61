use std::sync::Arc;
use std::sync::atomic::AtomicUsize;
use std::time;

use eyre::{Context, Result};
use quest_tracker::app::app::InitProps;
use quest_tracker::app::services::{ActionService, EventService, ShutdownCoordinator};
use quest_tracker::client::new_server;
use quest_tracker::config::constants::LOAD_TASKS_ERROR;
use quest_tracker::config::{Configuration, init_logger, verbose};
use quest_tracker::models::{Action, ArcEventTx};
use quest_tracker::notice_error;
use quest_tracker::{
    app::{App, destruct_terminal_for_panic},
    cli::Command,
};
use tokio::{sync::mpsc, task};
use tokio_util::sync::CancellationToken;

#[tokio::main]
async fn main() -> Result<()> {
    let cmd = Command::new();
    if cmd.version() {
        cmd.print_version();
        return Ok(());
    }

    std::panic::set_hook(Box::new(|panic_info| {
        destruct_terminal_for_panic();
        better_panic::Settings::auto().create_panic_handler()(panic_info);
    }));

    let config = cmd.get_config()?;
    Configuration::init(config).wrap_err("initializing configuration")?;
    let config = Configuration::instance();

    init_logger(&config.log)?;
    verbose!("[+] Logger initialized");

    let server = new_server(&config.server);
    verbose!("[+] Using server {}", config.server.endpoint);

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel();
    let (action_tx, action_rx) = mpsc::unbounded_channel::<Action>();

    let mut events = EventService::new();
    let event_tx: ArcEventTx = Arc::new(events.event_tx());

    let mut task_set = task::JoinSet::new();
    let token = CancellationToken::new();
    let pending_tasks = Arc::new(AtomicUsize::new(0));

    let mut action_service = ActionService::new(
        server.clone(),
        action_rx,
        event_tx,
        token.clone(),
        pending_tasks.clone(),
    )
    .with_reload_delay(config.reload.delay());

    task_set.spawn(async move { action_service.run().await });

    verbose!("[+] Fetching tasks...");
    let tasks = match server.list_tasks(&config.server.filter).await {
        Ok(tasks) => {
            verbose!("[+] Fetched {} tasks", tasks.len());
            tasks
        }
        Err(err) => {
            verbose!("[!] Failed to fetch tasks: {err:#}");
            log::error!("Error: {:?}", err);
            events.event_tx().send(notice_error!(LOAD_TASKS_ERROR)).ok();
            vec![]
        }
    };

    let mut app = App::new(
        action_tx,
        &mut events,
        token.clone(),
        InitProps {
            tasks,
            filter: config.server.filter.clone(),
        },
    );

    let coordinator = ShutdownCoordinator {
        pending_tasks: pending_tasks.clone(),
        shutdown_complete: shutdown_tx,
        timeout: None,
    };

    if let Err(err) = app.run().await {
        eprintln!("Error: {}", err);
    }

    task_set.spawn(coordinator.wait_for_completion());

    match tokio::time::timeout(time::Duration::from_secs(15), shutdown_rx).await {
        Ok(Ok(Ok(_))) => {}
        Ok(Ok(Err(e))) => eprintln!("Shutdown error: {}", e),
        Ok(Err(e)) => eprintln!("Shutdown error: {}", e),
        Err(_) => eprintln!("Shutdown timeout reached"),
    }

    task_set.abort_all();
    while let Some(res) = task_set.join_next().await {
        if let Err(err) = res {
            if !err.is_cancelled() {
                log::error!("Task error: {}", err);
            }
        }
    }

    Ok(())
}
