//! CLI signaling client.
//!
//! Joins a call room on the signaling relay and lets you drive the
//! offer/answer/ICE exchange by hand. Useful for exercising the relay
//! without a browser peer.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin campuslink-client -- --room <roomId> --user-id alice --role student
//! ```
//!
//! Commands:
//! - `offer <target> <payload...>` / `answer <target> <payload...>` /
//!   `ice <target> <payload...>`: send a targeted signaling message.
//!   The payload is sent as an opaque string blob.
//! - `leave`: leave the room (the connection stays open)
//! - `quit`: close the connection and exit

use clap::Parser;
use futures_util::{SinkExt, StreamExt};
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use tokio::sync::mpsc;
use tokio_tungstenite::{connect_async, tungstenite::Message};

use campuslink_server::domain::Role;
use campuslink_server::infrastructure::dto::websocket::{ClientSignal, ServerSignal};
use campuslink_shared::logger::setup_logger;

#[derive(Debug, Parser)]
#[command(name = "campuslink-client", about = "CampusLink signaling client")]
struct Args {
    /// Signaling endpoint
    #[arg(long, default_value = "ws://127.0.0.1:3001/ws")]
    server: String,

    /// Room token obtained from POST /join
    #[arg(long)]
    room: String,

    /// Identity to announce in the room
    #[arg(long)]
    user_id: String,

    /// Participant role: recruiter, college, or student
    #[arg(long, value_parser = parse_role, default_value = "student")]
    role: Role,
}

fn parse_role(value: &str) -> Result<Role, String> {
    match value {
        "recruiter" => Ok(Role::Recruiter),
        "college" => Ok(Role::College),
        "student" => Ok(Role::Student),
        other => Err(format!(
            "unknown role '{other}' (expected recruiter, college, or student)"
        )),
    }
}

/// One REPL command, already translated to a signaling message (or quit).
enum Command {
    Signal(ClientSignal),
    Quit,
}

fn parse_command(line: &str, room: &str, user_id: &str) -> Option<Command> {
    let mut parts = line.trim().splitn(3, ' ');
    let verb = parts.next()?;
    match verb {
        "quit" | "exit" => Some(Command::Quit),
        "leave" => Some(Command::Signal(ClientSignal::LeaveRoom {
            room_id: room.to_string(),
            user_id: user_id.to_string(),
        })),
        "offer" | "answer" | "ice" => {
            let Some(target) = parts.next() else {
                eprintln!("usage: {verb} <target> <payload...>");
                return None;
            };
            let payload =
                serde_json::Value::String(parts.next().unwrap_or_default().to_string());
            let signal = match verb {
                "offer" => ClientSignal::Offer {
                    room_id: room.to_string(),
                    payload,
                    target_user_id: target.to_string(),
                },
                "answer" => ClientSignal::Answer {
                    room_id: room.to_string(),
                    payload,
                    target_user_id: target.to_string(),
                },
                _ => ClientSignal::IceCandidate {
                    room_id: room.to_string(),
                    payload,
                    target_user_id: target.to_string(),
                },
            };
            Some(Command::Signal(signal))
        }
        "" => None,
        other => {
            eprintln!("unknown command '{other}' (offer / answer / ice / leave / quit)");
            None
        }
    }
}

fn print_signal(signal: &ServerSignal) {
    match signal {
        ServerSignal::UserJoined { user_id, user_type } => {
            println!("<- user-joined: {user_id} ({user_type})");
        }
        ServerSignal::UserLeft { user_id } => {
            println!("<- user-left: {user_id}");
        }
        ServerSignal::Offer {
            from_user_id,
            payload,
        } => {
            println!("<- offer from {from_user_id}: {payload}");
        }
        ServerSignal::Answer {
            from_user_id,
            payload,
        } => {
            println!("<- answer from {from_user_id}: {payload}");
        }
        ServerSignal::IceCandidate {
            from_user_id,
            payload,
        } => {
            println!("<- ice-candidate from {from_user_id}: {payload}");
        }
    }
}

async fn run_client(args: Args) -> Result<(), Box<dyn std::error::Error>> {
    let (ws, _) = connect_async(&args.server).await?;
    let (mut write, mut read) = ws.split();
    tracing::info!("Connected to {}", args.server);

    // Announce ourselves in the room
    let join = ClientSignal::JoinRoom {
        room_id: args.room.clone(),
        user_id: args.user_id.clone(),
        user_type: args.role,
    };
    write.send(Message::text(serde_json::to_string(&join)?)).await?;
    println!("-> joined room {}", args.room);

    // Print everything the relay forwards to us
    let mut read_task = tokio::spawn(async move {
        while let Some(msg) = read.next().await {
            match msg {
                Ok(Message::Text(text)) => {
                    match serde_json::from_str::<ServerSignal>(text.as_str()) {
                        Ok(signal) => print_signal(&signal),
                        Err(e) => tracing::warn!("Unparseable server message: {}", e),
                    }
                }
                Ok(Message::Close(_)) | Err(_) => break,
                Ok(_) => {}
            }
        }
        println!("connection closed by server");
    });

    // Blocking REPL feeding the writer through a channel
    let (cmd_tx, mut cmd_rx) = mpsc::unbounded_channel::<Command>();
    let room = args.room.clone();
    let user_id = args.user_id.clone();
    let repl_task = tokio::task::spawn_blocking(move || {
        let mut editor = match DefaultEditor::new() {
            Ok(editor) => editor,
            Err(e) => {
                tracing::error!("Failed to start line editor: {}", e);
                let _ = cmd_tx.send(Command::Quit);
                return;
            }
        };
        loop {
            match editor.readline("> ") {
                Ok(line) => {
                    let _ = editor.add_history_entry(line.as_str());
                    if let Some(command) = parse_command(&line, &room, &user_id) {
                        let quit = matches!(command, Command::Quit);
                        if cmd_tx.send(command).is_err() || quit {
                            break;
                        }
                    }
                }
                Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                    let _ = cmd_tx.send(Command::Quit);
                    break;
                }
                Err(e) => {
                    tracing::error!("Readline error: {}", e);
                    let _ = cmd_tx.send(Command::Quit);
                    break;
                }
            }
        }
    });

    // Forward REPL commands to the relay until quit or server close
    loop {
        tokio::select! {
            command = cmd_rx.recv() => match command {
                Some(Command::Signal(signal)) => {
                    write.send(Message::text(serde_json::to_string(&signal)?)).await?;
                }
                Some(Command::Quit) | None => break,
            },
            _ = &mut read_task => break,
        }
    }

    let _ = write.send(Message::Close(None)).await;
    read_task.abort();
    repl_task.abort();
    Ok(())
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "info");

    let args = Args::parse();
    if let Err(e) = run_client(args).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
