use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use chunkseq::{
    sum_values, ArraySequence, BuildConfig, Builder, CancelSignal, ChannelIterate, Element, Fill,
    LinkedSequence, PipeConfig, Sequence,
};
use clap::{Parser, ValueEnum};
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[command(name = "chunkseq", about = "Sum a chunked sequence through each iteration protocol")]
struct Cli {
    /// Number of chunks.
    #[arg(long, default_value_t = 1024)]
    chunks: usize,
    /// Elements per chunk.
    #[arg(long, default_value_t = 8192)]
    chunk_size: usize,
    /// Storage layout to build.
    #[arg(long, value_enum, default_value_t = Layout::Array)]
    layout: Layout,
    /// Protocol to run.
    #[arg(long, value_enum, default_value_t = Protocol::All)]
    protocol: Protocol,
    /// Buffer length for the fill protocol.
    #[arg(long, default_value_t = 4096)]
    buffer: usize,
    /// Pipe capacity for the channel protocols.
    #[arg(long, default_value_t = chunkseq::DEFAULT_PIPE_CAPACITY)]
    capacity: usize,
    /// Cancel the cancellable producer after this many milliseconds.
    #[arg(long)]
    timeout_ms: Option<u64>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Layout {
    Array,
    Linked,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum Protocol {
    Walk,
    Pull,
    Cursor,
    Channel,
    Cancellable,
    Relay,
    Fill,
    All,
}

impl Protocol {
    const EACH: [Protocol; 7] = [
        Protocol::Walk,
        Protocol::Pull,
        Protocol::Cursor,
        Protocol::Channel,
        Protocol::Cancellable,
        Protocol::Relay,
        Protocol::Fill,
    ];
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("warn"))?;
    fmt()
        .compact()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let config = BuildConfig::new(cli.chunks, cli.chunk_size).context("invalid sequence shape")?;
    let pipe = PipeConfig::new(cli.capacity).context("invalid pipe capacity")?;
    if cli.buffer == 0 {
        bail!("buffer length must be greater than zero");
    }

    let builder = Builder::new(config);
    match cli.layout {
        Layout::Array => run(Arc::new(builder.build::<ArraySequence, _>(|k| k as Element)), &cli, &pipe),
        Layout::Linked => run(Arc::new(builder.build::<LinkedSequence, _>(|k| k as Element)), &cli, &pipe),
    }

    Ok(())
}

fn run<S: Sequence>(seq: Arc<S>, cli: &Cli, pipe: &PipeConfig) {
    let protocols: &[Protocol] = match cli.protocol {
        Protocol::All => &Protocol::EACH,
        ref one => std::slice::from_ref(one),
    };

    for &protocol in protocols {
        let started = Instant::now();
        let sum = checksum(&seq, protocol, cli, pipe);
        println!(
            "{:<12}\tsum={}\telapsed={:?}",
            format!("{protocol:?}").to_lowercase(),
            sum,
            started.elapsed()
        );
    }
}

fn checksum<S: Sequence>(seq: &Arc<S>, protocol: Protocol, cli: &Cli, pipe: &PipeConfig) -> Element {
    match protocol {
        Protocol::Walk => seq.checksum(),
        Protocol::Pull => sum_values(&mut seq.pull()),
        Protocol::Cursor => sum_values(&mut seq.cursor()),
        Protocol::Channel => sum_values(&mut seq.channel_iter_with(pipe)),
        Protocol::Cancellable => {
            let signal = match cli.timeout_ms {
                Some(ms) => CancelSignal::timeout(Duration::from_millis(ms)),
                None => CancelSignal::never(),
            };
            sum_values(&mut seq.cancellable_channel_iter_with(signal, pipe))
        }
        Protocol::Relay => sum_values(&mut seq.relay_channel_iter_with(pipe)),
        Protocol::Fill => {
            let mut filler = seq.filler();
            let mut buf = vec![0; cli.buffer];
            let mut sum: Element = 0;
            loop {
                let n = filler.fill(&mut buf);
                if n == 0 {
                    break;
                }
                sum = buf[..n].iter().fold(sum, |acc, &item| acc.wrapping_add(item));
            }
            sum
        }
        Protocol::All => unreachable!("expanded before dispatch"),
    }
}
