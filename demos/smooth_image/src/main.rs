use argh::FromArgs;
use std::path::PathBuf;

use boxsmooth::imgproc::{filter::SmoothingMethod, parallel::ExecutionStrategy};

mod workflow;
use workflow::{KernelPolicy, PngDirectory, SmoothingSession};

#[derive(FromArgs)]
/// Smooth an image with a mean filter and write the results as PNG
struct Args {
    /// path to an input image
    #[argh(option, short = 'i')]
    input: PathBuf,

    /// directory where the original and smoothed images are written
    #[argh(option, short = 'o', default = "PathBuf::from(\"output\")")]
    output_dir: PathBuf,

    /// kernel size, can be repeated to re-process the same image (default: 3)
    #[argh(option, short = 'k')]
    kernel_size: Vec<i64>,

    /// allowed kernel sizes, a comma separated list or `any` (default: 3,5)
    #[argh(option)]
    allowed: Option<String>,

    /// number of worker threads, uses the global pool when omitted
    #[argh(option)]
    threads: Option<usize>,

    /// use the summed-area table instead of visiting every neighbor
    #[argh(switch)]
    summed_area: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args: Args = argh::from_env();

    let policy = match args.allowed {
        Some(allowed) => allowed.parse()?,
        None => KernelPolicy::default(),
    };
    let kernel_sizes = if args.kernel_size.is_empty() {
        vec![3]
    } else {
        args.kernel_size
    };

    // reject every invalid choice before doing any work
    let kernel_sizes = kernel_sizes
        .into_iter()
        .map(|k| policy.check(k))
        .collect::<Result<Vec<_>, _>>()?;

    let strategy = match args.threads {
        Some(n) => ExecutionStrategy::Fixed(n),
        None => ExecutionStrategy::Auto,
    };
    let method = if args.summed_area {
        SmoothingMethod::SummedArea
    } else {
        SmoothingMethod::Direct
    };

    let bytes = std::fs::read(&args.input)?;
    let mut session = SmoothingSession::upload(&bytes)?
        .with_strategy(strategy)
        .with_method(method);

    log::info!("smoothing {} with {policy} kernels", session.source().size());

    let mut presenter = PngDirectory::new(&args.output_dir)?;
    session.show_original(&mut presenter)?;

    for kernel_size in kernel_sizes {
        session.show_smoothed(&mut presenter, kernel_size)?;
    }

    let milestones = session.milestones();
    log::info!(
        "uploaded: {}, original displayed: {}, smoothed displayed: {}",
        milestones.uploaded,
        milestones.original_displayed,
        milestones.smoothed_displayed
    );

    Ok(())
}
