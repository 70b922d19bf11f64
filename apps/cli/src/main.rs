use anyhow::Result;
use clap::{Parser, Subcommand};
use client_core::{load_settings, AppContext, SignUpForm, BREAK_PROMPT};
use serde::Serialize;
use shared::domain::{Emotion, LessonMode};
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "ableed", about = "AbleEd session and accessibility state from the terminal")]
struct Cli {
    /// Storage directory, `memory:` or `unavailable:`.
    #[arg(long)]
    storage: Option<String>,
    #[arg(long)]
    origin: Option<String>,
    /// Print machine-readable output.
    #[arg(long)]
    json: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Status,
    Login,
    Logout,
    SignUp {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
    },
    /// Apply accessibility toggles and print the resulting directives.
    Toggles {
        #[arg(long, default_value_t = 0)]
        increase: u8,
        #[arg(long, default_value_t = 0)]
        decrease: u8,
        #[arg(long)]
        high_contrast: bool,
        #[arg(long)]
        dyslexia_font: bool,
        #[arg(long)]
        reset: bool,
    },
    /// Run the brain-break countdown until it reaches zero or Ctrl+C.
    BreakTimer {
        #[arg(long)]
        seconds: Option<u32>,
    },
    /// Walk through sign-up, dashboard and classroom in one process.
    Demo,
}

#[derive(Serialize)]
struct StatusReport<'a> {
    origin: &'a str,
    storage: &'a str,
    is_authenticated: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = load_settings();
    if let Some(storage) = cli.storage.clone() {
        settings.storage_location = storage;
    }
    if let Some(origin) = cli.origin.clone() {
        settings.origin = origin;
    }
    if let Command::BreakTimer {
        seconds: Some(seconds),
    } = cli.command
    {
        settings.break_timer_seconds = seconds;
    }

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
    debug!(?settings, "settings loaded");

    let app = AppContext::new(settings);
    let result = run(&app, cli.command, cli.json).await;
    app.shutdown();
    result
}

async fn run(app: &AppContext, command: Command, json: bool) -> Result<()> {
    match command {
        Command::Status => print_status(app, json)?,
        Command::Login => {
            app.session().login();
            print_status(app, json)?;
        }
        Command::Logout => {
            app.session().logout();
            print_status(app, json)?;
        }
        Command::SignUp {
            name,
            email,
            password,
            confirm_password,
        } => {
            let form = SignUpForm {
                name,
                email,
                password,
                confirm_password,
            };
            match app.sign_up_view().submit(&form) {
                Ok(route) => println!("signed up; navigate to {route}"),
                Err(err) => {
                    for field in &err.errors {
                        eprintln!("{:?}: {}", field.field, field.message);
                    }
                    return Err(err.into());
                }
            }
        }
        Command::Toggles {
            increase,
            decrease,
            high_contrast,
            dyslexia_font,
            reset,
        } => {
            let mut bar = app.mount_toggle_bar();
            for _ in 0..increase {
                bar.increase_font();
            }
            for _ in 0..decrease {
                bar.decrease_font();
            }
            if high_contrast {
                bar.toggles().toggle_high_contrast();
            }
            if dyslexia_font {
                bar.toggles().toggle_dyslexia_font();
            }
            if reset {
                bar.reset();
            }
            print_directives(app, json)?;
        }
        Command::BreakTimer { .. } => run_break_timer(app).await?,
        Command::Demo => run_demo(app, json)?,
    }
    Ok(())
}

fn print_status(app: &AppContext, json: bool) -> Result<()> {
    let report = StatusReport {
        origin: &app.settings().origin,
        storage: &app.settings().storage_location,
        is_authenticated: app.session().is_authenticated(),
    };
    if json {
        println!("{}", serde_json::to_string(&report)?);
    } else {
        println!(
            "origin={} storage={} authenticated={}",
            report.origin, report.storage, report.is_authenticated
        );
    }
    Ok(())
}

fn print_directives(app: &AppContext, json: bool) -> Result<()> {
    let directives = app.document().directives();
    if json {
        println!("{}", serde_json::to_string(&directives)?);
    } else {
        println!(
            "font-size: {}; classes: [{}]",
            directives.font_size,
            directives.classes.join(", ")
        );
    }
    Ok(())
}

async fn run_break_timer(app: &AppContext) -> Result<()> {
    let mut classroom = app.mount_classroom();
    let mut remaining = classroom.break_timer().watch();
    classroom.start_break()?;
    println!("{}s", *remaining.borrow_and_update());
    if classroom.break_timer().is_elapsed() {
        println!("{BREAK_PROMPT}");
        classroom.unmount();
        return Ok(());
    }

    loop {
        tokio::select! {
            changed = remaining.changed() => {
                if changed.is_err() {
                    break;
                }
                let seconds = *remaining.borrow_and_update();
                println!("{seconds}s");
                if seconds == 0 {
                    println!("{BREAK_PROMPT}");
                    break;
                }
            }
            _ = tokio::signal::ctrl_c() => {
                classroom.pause_break();
                println!("paused at {}s", classroom.break_timer().remaining());
                break;
            }
        }
    }

    classroom.unmount();
    Ok(())
}

fn run_demo(app: &AppContext, json: bool) -> Result<()> {
    app.session().logout();
    let dashboard = app.mount_dashboard();
    println!(
        "dashboard mounted: authenticated={} redirect={:?}",
        dashboard.state().is_authenticated,
        dashboard.take_redirect().map(|route| route.path())
    );

    let route = app.sign_up_view().submit(&SignUpForm {
        name: "Demo Learner".into(),
        email: "learner@example.com".into(),
        password: "accessible".into(),
        confirm_password: "accessible".into(),
    })?;
    println!(
        "sign-up accepted; navigate to {route}; dashboard authenticated={}",
        dashboard.state().is_authenticated
    );

    let mut classroom = app.mount_classroom();
    let bar = app.mount_toggle_bar();
    classroom.set_mode(LessonMode::Audio);
    classroom.check_in(Emotion::Happy);
    if let Some(caption) = classroom.caption() {
        println!("caption: {caption}");
    }

    bar.increase_font();
    bar.increase_font();
    classroom.toggles().set_high_contrast(true);
    print_directives(app, json)?;

    classroom.toggles_mut().reset();
    print_directives(app, json)?;

    app.session().logout();
    println!(
        "logged out; dashboard redirect={:?}",
        dashboard.take_redirect().map(|route| route.path())
    );

    classroom.unmount();
    Ok(())
}
