//! Terminal front-end: each subcommand drives the same view model the
//! screens would, and prints what they would render.

use std::sync::Arc;
use std::time::{Duration, Instant};

use clap::Parser;
use tokio::sync::mpsc;
use tracing_subscriber::EnvFilter;

use marsphotos::cli::{self, Command, ListArgs, ShowArgs, WatchArgs};
use marsphotos::config::Config;
use marsphotos::mars::{HttpFetchClient, PhotoRecord};
use marsphotos::shutdown;
use marsphotos::view::{
    camera_options, result_count_label, Navigator, PhotoFilter, PhotoViewModel, ViewState,
    Viewport,
};

/// Fetch once and return the list, or the error message as an error.
async fn load(vm: &PhotoViewModel) -> anyhow::Result<Vec<Arc<PhotoRecord>>> {
    vm.fetch_photos().await;
    match vm.state() {
        ViewState::Success(photos) => Ok(photos),
        ViewState::Error(message) => anyhow::bail!("{}", message),
        ViewState::Loading => anyhow::bail!("Photo list is still loading"),
    }
}

fn filter_from(args: &ListArgs) -> PhotoFilter {
    PhotoFilter::new(args.search.as_deref(), args.camera.as_deref())
}

fn print_grid(photos: &[Arc<PhotoRecord>], filter: &PhotoFilter) {
    let shown = filter.apply(photos);
    println!("{}", result_count_label(shown.len()));
    for photo in &shown {
        println!(
            "{:<10} {:<8} {:<12} {}",
            photo.id, photo.camera.name, photo.capture_date, photo.image_url
        );
    }
}

async fn run_list(vm: &PhotoViewModel, args: ListArgs) -> anyhow::Result<()> {
    let photos = load(vm).await?;
    print_grid(&photos, &filter_from(&args));
    Ok(())
}

async fn run_cameras(vm: &PhotoViewModel) -> anyhow::Result<()> {
    let photos = load(vm).await?;
    for camera in camera_options(&photos) {
        println!("{}", camera);
    }
    Ok(())
}

async fn run_show(vm: &PhotoViewModel, args: ShowArgs) -> anyhow::Result<()> {
    load(vm).await?;
    let photo = vm
        .state()
        .find(&args.id)
        .cloned()
        .ok_or_else(|| anyhow::anyhow!("Photo '{}' not found", args.id))?;

    let mut nav = Navigator::new(vm.clone());
    nav.finish_splash();
    nav.open_detail(photo);
    let photo = nav
        .detail_photo()
        .ok_or_else(|| anyhow::anyhow!("No photo selected"))?;

    let mut viewport = Viewport::new(args.width, args.height);
    if args.zoom != 1.0 || args.pan_x != 0.0 || args.pan_y != 0.0 {
        viewport.transform(args.pan_x, args.pan_y, args.zoom, Instant::now());
    }
    let (offset_x, offset_y) = viewport.offset();

    println!("Mars photo #{}", photo.id);
    println!("  Date:   {}", photo.capture_date);
    println!("  Camera: {}", photo.camera.name);
    println!("  Image:  {}", photo.image_url);
    println!(
        "  View:   {:.2}x, offset ({:.1}, {:.1})",
        viewport.scale(),
        offset_x,
        offset_y
    );

    nav.back();
    Ok(())
}

fn print_state(state: &ViewState, filter: &PhotoFilter) {
    let now = chrono::Local::now().format("%H:%M:%S");
    match state {
        ViewState::Loading => println!("[{}] Loading...", now),
        ViewState::Error(message) => {
            println!("[{}] {} (type r to retry)", now, message)
        }
        ViewState::Success(photos) => {
            println!("[{}] Updated", now);
            print_grid(photos, filter);
        }
    }
}

/// Forward stdin lines from a plain thread so a pending read never holds up
/// runtime shutdown.
fn spawn_stdin_reader() -> mpsc::UnboundedReceiver<String> {
    let (tx, rx) = mpsc::unbounded_channel();
    std::thread::spawn(move || {
        for line in std::io::stdin().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read stdin: {}", e);
                    break;
                }
            }
        }
    });
    rx
}

async fn run_watch(vm: &PhotoViewModel, args: WatchArgs) -> anyhow::Result<()> {
    let shutdown_token = shutdown::install_signal_handler()?;
    let filter = filter_from(&args.filter);

    let mut state_rx = vm.subscribe_state();
    let mut refreshing_rx = vm.subscribe_refreshing();
    let mut commands = spawn_stdin_reader();
    let mut stdin_open = true;

    let mut ticker = tokio::time::interval(Duration::from_secs(args.interval));
    ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
    // The first tick completes immediately; the initial load is a fetch.
    ticker.tick().await;

    vm.launch_fetch();

    loop {
        tokio::select! {
            _ = shutdown_token.cancelled() => {
                tracing::info!("Shutdown requested, exiting...");
                break;
            }
            changed = state_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = state_rx.borrow_and_update().clone();
                print_state(&state, &filter);
            }
            changed = refreshing_rx.changed() => {
                if changed.is_err() {
                    break;
                }
                if *refreshing_rx.borrow_and_update() {
                    println!("Refreshing...");
                }
            }
            _ = ticker.tick() => {
                tracing::debug!("Periodic refresh");
                vm.request_refresh();
            }
            line = commands.recv(), if stdin_open => match line {
                Some(line) => match line.trim() {
                    "r" => {
                        vm.request_refresh();
                    }
                    "q" => break,
                    "" => {}
                    other => println!("Unknown command '{}': type r to refresh, q to quit", other),
                },
                None => stdin_open = false,
            },
        }
    }

    vm.close();
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = cli::Cli::parse();
    let config = Config::from_cli(&cli)?;

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_filter())),
        )
        .init();

    tracing::debug!(?config, "Starting marsphotos");

    let client = HttpFetchClient::new(&config.base_url, config.timeout)?;
    let vm = PhotoViewModel::new(Arc::new(client));

    match cli.command {
        Command::List(args) => run_list(&vm, args).await,
        Command::Cameras => run_cameras(&vm).await,
        Command::Show(args) => run_show(&vm, args).await,
        Command::Watch(args) => run_watch(&vm, args).await,
    }
}
