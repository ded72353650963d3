use crate::ui::primitives::icon::Icon;
use watchrun::config::Verbosity;
use watchrun::WatchEvent;

pub fn render_watch_header(
    command: &str,
    targets: usize,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    format!(
        "{} watchrun: {} file{}, running '{}'\n",
        Icon::Watch.colored(supports_color, supports_unicode),
        targets,
        if targets == 1 { "" } else { "s" },
        command
    )
}

/// Whether `event` is shown at the given verbosity.
pub fn is_visible(event: &WatchEvent, verbosity: Verbosity) -> bool {
    match verbosity {
        Verbosity::Quiet => event.is_error(),
        Verbosity::Normal => event.is_notice(),
        Verbosity::Verbose => true,
    }
}

pub fn render_watch_event(
    timestamp: &str,
    event: &WatchEvent,
    supports_color: bool,
    supports_unicode: bool,
) -> String {
    let prefix = format!("[{}]", timestamp);
    let icon = |icon: Icon| icon.colored(supports_color, supports_unicode);

    match event {
        WatchEvent::WatchStarted { targets } => {
            format!("{} {} Watching {} file(s)\n", prefix, icon(Icon::Watch), targets)
        }
        WatchEvent::FileChanged { path } => {
            format!("{} {} Changed: {}\n", prefix, icon(Icon::Arrow), path)
        }
        WatchEvent::TargetReopened { path } => {
            format!("{} {} Reopened: {}\n", prefix, icon(Icon::Arrow), path)
        }
        WatchEvent::TargetLost { path, message } => format!(
            "{} {} No longer watching {}: {}\n",
            prefix,
            icon(Icon::Warning),
            path,
            message
        ),
        WatchEvent::CommandStarted { command } => {
            format!("{} {} Running: {}\n", prefix, icon(Icon::Progress), command)
        }
        WatchEvent::CommandFinished { code: Some(0) } => {
            format!("{} {} Command exited 0\n", prefix, icon(Icon::Success))
        }
        WatchEvent::CommandFinished { code: Some(code) } => {
            format!("{} {} Command exited {}\n", prefix, icon(Icon::Error), code)
        }
        WatchEvent::CommandFinished { code: None } => format!(
            "{} {} Command terminated by signal\n",
            prefix,
            icon(Icon::Error)
        ),
        WatchEvent::CommandSpawned { pid } => {
            format!("{} {} Started pid {}\n", prefix, icon(Icon::Progress), pid)
        }
        WatchEvent::Warning { message } => {
            format!("{} {} Warning: {}\n", prefix, icon(Icon::Warning), message)
        }
        WatchEvent::Error { message } => {
            format!("{} {} Error: {}\n", prefix, icon(Icon::Error), message)
        }
        WatchEvent::Shutdown => format!("{} {} Watch stopped.\n", prefix, icon(Icon::Watch)),
    }
}
