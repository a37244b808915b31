//! unitprobe binary
//!
//! Walks the standard command catalog against one device and prints the
//! collected profile to stdout.

use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;

use clap::Parser;
use rumqttc::{Event, Packet};
use tracing_subscriber::{fmt, EnvFilter};

use unitprobe::{
    Catalog, Config, MqttTransport, ProbeError, Profile, Reply, Session, Step,
};

/// unitprobe CLI
#[derive(Parser, Debug)]
#[command(name = "unitprobe")]
#[command(about = "Collects a settings profile from a field unit over MQTT")]
#[command(version)]
struct Args {
    /// MQTT broker host
    host: String,

    /// Device name (selects the per-device topics)
    device: String,

    /// MQTT broker port
    #[arg(short, long, default_value = "1883")]
    port: u16,

    /// Pause between a correlated reply and the next command (ms)
    #[arg(short, long, default_value = "500")]
    settle_ms: u64,

    /// Re-send the outstanding command when no reply arrives within this
    /// many ms (off by default: wait indefinitely)
    #[arg(short, long)]
    timeout_ms: Option<u64>,
}

fn main() {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,unitprobe=debug"));

    fmt().with_env_filter(filter).with_target(true).init();

    let args = Args::parse();

    tracing::info!("unitprobe v{}", unitprobe::VERSION);
    tracing::info!("Broker: {}:{}", args.host, args.port);
    tracing::info!("Device: {}", args.device);

    let config = Config::builder()
        .host(&args.host)
        .port(args.port)
        .device(&args.device)
        .settle_ms(args.settle_ms)
        .reply_timeout_ms(args.timeout_ms)
        .build();

    match run(&config) {
        Ok(profile) => println!("{}", profile.render()),
        Err(e) => {
            tracing::error!("probe failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Drive one probe run to completion
fn run(config: &Config) -> unitprobe::Result<Profile> {
    let transport = MqttTransport::connect(config)?;
    let MqttTransport {
        mut sink,
        mut connection,
        reply_topic,
    } = transport;

    let mut session = Session::new(Catalog::standard(), config.settle());
    let mut started = false;

    // The connection iterator drives the network; forward its events into a
    // channel so the probe loop below stays the single thread that touches
    // the session.
    let (event_tx, event_rx) = mpsc::channel();
    thread::spawn(move || {
        for event in connection.iter() {
            if event_tx.send(event).is_err() {
                break;
            }
        }
    });

    loop {
        let event = match config.reply_timeout() {
            Some(window) => match event_rx.recv_timeout(window) {
                Ok(event) => event,
                Err(RecvTimeoutError::Timeout) => {
                    if let Step::Finished = session.handle_timeout(&mut sink)? {
                        return Ok(session.into_profile());
                    }
                    continue;
                }
                Err(RecvTimeoutError::Disconnected) => {
                    return Err(ProbeError::Transport("event loop terminated".to_string()))
                }
            },
            None => event_rx
                .recv()
                .map_err(|_| ProbeError::Transport("event loop terminated".to_string()))?,
        };

        // Connection-level failures are fatal; there is no recovery
        // strategy beyond restarting the run.
        match event? {
            Event::Incoming(Packet::ConnAck(_)) => {
                tracing::info!("connected, subscribing to {}", reply_topic);
                sink.subscribe(&reply_topic)?;
                let step = if started {
                    // Reconnect: the outstanding command may have been lost
                    session.handle_timeout(&mut sink)?
                } else {
                    started = true;
                    session.start(&mut sink)?
                };
                if let Step::Finished = step {
                    return Ok(session.into_profile());
                }
            }
            Event::Incoming(Packet::Publish(publish)) => {
                if publish.topic != reply_topic {
                    continue;
                }
                let reply = match Reply::parse(&publish.payload) {
                    Ok(reply) => reply,
                    Err(e) => {
                        tracing::debug!("ignoring unparseable reply: {}", e);
                        continue;
                    }
                };
                if let Step::Finished = session.handle_reply(reply, &mut sink)? {
                    return Ok(session.into_profile());
                }
            }
            _ => {}
        }
    }
}
