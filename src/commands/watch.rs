use std::io;

use anyhow::{bail, Context, Result};

use crate::cli::Cli;
use crate::ui::context::UiContext;
use crate::ui::terminal::{clear_screen, stdin_is_terminal};
use crate::ui::views::watch::{is_visible, render_watch_event, render_watch_header};
use watchrun::config::{Config, Verbosity};
use watchrun::{
    read_path_list, register_all, CommandSpec, DispatchLoop, NativeNotifier, ProcessInvoker,
    RunMode, WatchEvent, WatchrunError,
};

pub fn cmd_watch(cli: Cli) -> Result<()> {
    let (mut config, warnings) =
        Config::load_or_default(cli.config.as_deref()).context("failed to load configuration")?;
    apply_cli_overrides(&mut config, &cli);

    let ui = UiContext::new(cli.json, cli.verbose, cli.color, &config);
    for warning in warnings {
        report(
            &ui,
            &WatchEvent::Warning {
                message: warning.to_string(),
            },
        );
    }

    if stdin_is_terminal() {
        bail!("no paths on stdin: pipe in a list of files, e.g. `ls *.rs | watchrun cargo test`");
    }

    let Some(command) = CommandSpec::from_argv(&cli.command) else {
        bail!("no program given");
    };

    let paths = read_path_list(io::stdin().lock(), config.watch.max_targets)
        .context("failed to read paths from stdin")?;
    if paths.is_empty() {
        return Err(WatchrunError::NoTargets.into());
    }

    let mut notifier =
        NativeNotifier::new().context("failed to start the file notification backend")?;
    let targets = register_all(&mut notifier, &paths, config.watch.max_targets)?;

    // SIGINT, SIGTERM and SIGHUP all wake the loop through the notifier queue
    let interrupter = notifier.interrupter();
    ctrlc::set_handler(move || interrupter.interrupt())
        .context("failed to install the termination handler")?;

    let mode = if config.run.restart {
        RunMode::Restart
    } else {
        RunMode::Blocking
    };
    let mut dispatch = DispatchLoop::new(targets, command, notifier, ProcessInvoker::new(mode));

    let clear = config.run.clear;
    let on_event = |event: WatchEvent| {
        if clear && matches!(event, WatchEvent::CommandStarted { .. }) {
            if let Err(err) = clear_screen() {
                report(
                    &ui,
                    &WatchEvent::Warning {
                        message: format!("cannot clear the screen: {err}"),
                    },
                );
            }
        }
        report(&ui, &event);
    };

    if !ui.json && ui.caps.is_tty && ui.verbosity == Verbosity::Verbose {
        eprint!(
            "{}",
            render_watch_header(
                &dispatch.command().to_string(),
                dispatch.targets().len(),
                ui.color,
                ui.unicode
            )
        );
    }

    on_event(WatchEvent::WatchStarted {
        targets: dispatch.targets().len(),
    });

    if !config.run.postpone {
        dispatch.invoke_now(&on_event);
    }

    dispatch.run(None, &on_event)?;
    Ok(())
}

/// CLI flags win over config and environment.
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if cli.restart {
        config.run.restart = true;
    }
    if cli.clear {
        config.run.clear = true;
    }
    if cli.postpone {
        config.run.postpone = true;
    }
    if let Some(max) = cli.max_targets {
        config.watch.max_targets = max;
    }
}

/// All watchrun output goes to stderr; stdout belongs to the command.
fn report(ui: &UiContext, event: &WatchEvent) {
    if ui.json {
        eprintln!("{}", event.to_json());
    } else if is_visible(event, ui.verbosity) {
        let timestamp = chrono::Local::now().format("%H:%M:%S").to_string();
        eprint!(
            "{}",
            render_watch_event(&timestamp, event, ui.color, ui.unicode)
        );
    }
}
