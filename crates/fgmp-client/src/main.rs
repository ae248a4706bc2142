use std::net::SocketAddr;
use std::time::Duration;

use anyhow::bail;
use clap::Parser;
use tracing::{Level, debug, info, warn};
use tracing_subscriber::FmtSubscriber;

use fgmp_client::{InboundEvent, SessionConfig, StaticSource, spawn};
use fgmp_proto::{Kinematics, constants::DEFAULT_SERVER_PORT, header::RangeNm};

/// Multiplayer position client
#[derive(Parser, Debug)]
#[command(name = "fgmp-client")]
#[command(about = "Streams an aircraft position to a multiplayer server", long_about = None)]
struct Args {
    /// Server host name or address
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Server UDP port
    #[arg(short, long, default_value_t = DEFAULT_SERVER_PORT)]
    port: u16,

    /// Local bind address (defaults to an ephemeral wildcard port)
    #[arg(long)]
    bind: Option<SocketAddr>,

    /// Send period in milliseconds
    #[arg(long, default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    cadence_ms: u64,

    /// Callsign (7 bytes max on the wire)
    #[arg(short, long, default_value = "AFMC")]
    callsign: String,

    /// Aircraft model path
    #[arg(long, default_value = "Aircraft/f16/Models/F-16.xml")]
    model: String,

    /// Requested minimum range in nautical miles
    #[arg(long, default_value_t = 0)]
    range_min: u16,

    /// Requested maximum range in nautical miles
    #[arg(long, default_value_t = 100)]
    range_max: u16,

    /// Port advertised for replies (0 = none)
    #[arg(long, default_value_t = 0)]
    reply_port: u16,

    /// Interpolation lag hint
    #[arg(long, default_value_t = 1.0)]
    lag: f64,

    /// Per-send timeout in milliseconds
    #[arg(long)]
    send_timeout_ms: Option<u64>,

    /// Per-receive timeout in milliseconds
    #[arg(long)]
    recv_timeout_ms: Option<u64>,

    /// Geocentric position x,y,z in metres
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = [2589114.800074, -1080806.835734, 5708738.990279]
    )]
    position: Vec<f64>,

    /// Orientation angles x,y,z
    #[arg(
        long,
        value_delimiter = ',',
        allow_negative_numbers = true,
        default_values_t = [-2.130530f32, -1.660662, 0.242749]
    )]
    orientation: Vec<f32>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, default_value = "info")]
    log_level: Level,
}

impl Args {
    fn session_config(&self) -> SessionConfig {
        SessionConfig {
            host: self.host.clone(),
            port: self.port,
            local_bind: self.bind,
            cadence: Duration::from_millis(self.cadence_ms),
            callsign: self.callsign.clone(),
            model: self.model.clone(),
            range: RangeNm {
                min: self.range_min,
                max: self.range_max,
            },
            reply_port: self.reply_port,
            lag: self.lag,
            send_timeout: self.send_timeout_ms.map(Duration::from_millis),
            recv_timeout: self.recv_timeout_ms.map(Duration::from_millis),
        }
    }

    fn kinematics(&self) -> anyhow::Result<Kinematics> {
        let (Ok(position), Ok(orientation)) = (
            <[f64; 3]>::try_from(self.position.as_slice()),
            <[f32; 3]>::try_from(self.orientation.as_slice()),
        ) else {
            bail!("--position and --orientation take exactly three comma-separated values");
        };

        Ok(Kinematics {
            position,
            orientation,
            ..Kinematics::default()
        })
    }
}

fn log_event(event: InboundEvent) {
    match event {
        InboundEvent::Position { from, update } => {
            let k = update.kinematics();
            info!(
                %from,
                callsign = %update.callsign(),
                model = %update.position.model,
                x = k.position[0],
                y = k.position[1],
                z = k.position[2],
                "Position received"
            );
        }
        InboundEvent::Malformed { from, error } => {
            debug!(%from, %error, "Malformed datagram discarded");
        }
        InboundEvent::Error(e) => {
            warn!(error = %e, "Receive error");
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Initialize tracing
    let subscriber = FmtSubscriber::builder()
        .with_max_level(args.log_level)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let kinematics = args.kinematics()?;
    let config = args.session_config();

    let handle = spawn(config, StaticSource(kinematics), log_event).await?;
    info!(
        "Streaming position to {} every {} ms",
        handle.session().remote_addr(),
        args.cadence_ms
    );

    tokio::select! {
        res = tokio::signal::ctrl_c() => {
            res?;
            info!("Interrupted; shutting down");
        }
        _ = handle.session().closed() => {
            warn!("Session closed unexpectedly; shutting down");
        }
    }
    handle.close();

    let (stats, exit) = handle.join().await?;
    info!(
        sent = stats.sent,
        failed = stats.failed,
        ?exit,
        "Session finished"
    );
    Ok(())
}
