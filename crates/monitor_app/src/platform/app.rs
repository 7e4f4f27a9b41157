//! Dashboard event loop: redraws on every store or status change and reads
//! operator commands from stdin.

use std::sync::Arc;

use monitor_engine::{ChannelHandle, WebSocketTransport};
use monitor_logging::{monitor_debug, monitor_error, monitor_info, monitor_warn};
use serde_json::Value;
use tokio::io::{AsyncBufReadExt, BufReader};

use super::config::MonitorConfig;
use super::ui::render::render;

#[derive(Debug, Clone, PartialEq)]
enum Command {
    Connect,
    Disconnect,
    Reset,
    Send(Value),
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
enum CommandError {
    #[error("unknown command `{0}` (try connect, disconnect, reset, send <json>, quit)")]
    Unknown(String),
    #[error("`send` expects a JSON payload: {0}")]
    Payload(String),
}

fn parse_command(line: &str) -> Result<Option<Command>, CommandError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let command = match word {
        "connect" => Command::Connect,
        "disconnect" => Command::Disconnect,
        "reset" => Command::Reset,
        "quit" | "exit" => Command::Quit,
        "send" => {
            let payload = serde_json::from_str(rest)
                .map_err(|err| CommandError::Payload(err.to_string()))?;
            Command::Send(payload)
        }
        other => return Err(CommandError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

pub async fn run_app(config: MonitorConfig) -> anyhow::Result<()> {
    let settings = config.channel_settings()?;
    monitor_info!("Monitoring progress at {}", settings.endpoint);

    let handle = ChannelHandle::spawn(settings, Arc::new(WebSocketTransport));
    let mut store_rx = handle.subscribe();
    let mut status_rx = handle.subscribe_status();
    handle.connect();

    let mut stdin = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    draw(&handle);
    loop {
        tokio::select! {
            changed = store_rx.changed() => {
                if changed.is_err() {
                    monitor_error!("Progress channel stopped unexpectedly");
                    break;
                }
                draw(&handle);
            }
            changed = status_rx.changed() => {
                if changed.is_err() {
                    monitor_error!("Progress channel stopped unexpectedly");
                    break;
                }
                draw(&handle);
            }
            line = stdin.next_line(), if stdin_open => {
                match line {
                    Ok(Some(line)) => match parse_command(&line) {
                        Ok(Some(Command::Quit)) => break,
                        Ok(Some(command)) => execute(&handle, command),
                        Ok(None) => {}
                        Err(err) => eprintln!("{err}"),
                    },
                    Ok(None) => stdin_open = false,
                    Err(err) => {
                        monitor_warn!("stdin closed: {}", err);
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                monitor_debug!("Interrupted");
                break;
            }
        }
    }

    handle.shutdown().await;
    monitor_info!("Monitor stopped");
    Ok(())
}

fn execute(handle: &ChannelHandle, command: Command) {
    match command {
        Command::Connect => handle.connect(),
        Command::Disconnect => handle.disconnect(),
        Command::Reset => handle.reset_progress(),
        Command::Send(payload) => handle.send(payload),
        Command::Quit => {}
    }
}

fn draw(handle: &ChannelHandle) {
    let lines = render(&handle.view(), handle.status(), chrono::Local::now());
    println!();
    for line in lines {
        println!("{line}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_command("   "), Ok(None));
    }

    #[test]
    fn bare_commands_parse() {
        assert_eq!(parse_command("connect"), Ok(Some(Command::Connect)));
        assert_eq!(parse_command(" disconnect "), Ok(Some(Command::Disconnect)));
        assert_eq!(parse_command("reset"), Ok(Some(Command::Reset)));
        assert_eq!(parse_command("exit"), Ok(Some(Command::Quit)));
    }

    #[test]
    fn send_carries_json_payload() {
        assert_eq!(
            parse_command(r#"send {"action": "cancel"}"#),
            Ok(Some(Command::Send(json!({"action": "cancel"}))))
        );
    }

    #[test]
    fn send_without_valid_json_is_rejected() {
        assert!(matches!(
            parse_command("send {oops"),
            Err(CommandError::Payload(_))
        ));
        assert!(matches!(parse_command("send"), Err(CommandError::Payload(_))));
    }

    #[test]
    fn unknown_word_is_rejected() {
        assert_eq!(
            parse_command("launch now"),
            Err(CommandError::Unknown("launch".to_string()))
        );
    }
}
