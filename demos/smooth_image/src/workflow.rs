use std::path::PathBuf;

use boxsmooth::{
    image::{ImageError, Rgba8Image},
    imgproc::{
        filter::{self, KernelSize, SmoothingMethod},
        parallel::ExecutionStrategy,
    },
    io::{error::IoError, functional as F},
};

/// Errors raised by the host workflow.
#[derive(thiserror::Error, Debug)]
pub enum WorkflowError {
    /// The engine rejected its input.
    #[error(transparent)]
    Image(#[from] ImageError),

    /// Decoding or presenting an image failed.
    #[error(transparent)]
    Io(#[from] IoError),

    /// The kernel size is valid for the engine but not offered by the host.
    #[error("kernel size {0} is not one of the allowed choices ({1})")]
    KernelNotAllowed(KernelSize, KernelPolicy),

    /// The kernel policy string could not be parsed.
    #[error("invalid kernel policy `{0}`")]
    InvalidPolicy(String),
}

/// Which kernel sizes the host exposes to its users.
///
/// The engine accepts any odd size; restricting the choices is a host decision.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KernelPolicy {
    /// Every size the engine accepts.
    Any,
    /// Only the listed sizes.
    OneOf(Vec<KernelSize>),
}

impl Default for KernelPolicy {
    fn default() -> Self {
        // 3x3 and 5x5 radio choices
        let sizes = [3, 5]
            .into_iter()
            .filter_map(|k| KernelSize::new(k).ok())
            .collect();
        KernelPolicy::OneOf(sizes)
    }
}

impl std::str::FromStr for KernelPolicy {
    type Err = WorkflowError;

    /// Parse `any` or a comma separated list of sizes such as `3,5`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case("any") {
            return Ok(KernelPolicy::Any);
        }

        let sizes = s
            .split(',')
            .map(|tok| {
                let k: i64 = tok
                    .trim()
                    .parse()
                    .map_err(|_| WorkflowError::InvalidPolicy(s.to_string()))?;
                Ok(KernelSize::try_from(k)?)
            })
            .collect::<Result<Vec<_>, WorkflowError>>()?;

        Ok(KernelPolicy::OneOf(sizes))
    }
}

impl std::fmt::Display for KernelPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        match self {
            KernelPolicy::Any => write!(f, "any"),
            KernelPolicy::OneOf(sizes) => {
                let names = sizes.iter().map(|k| k.to_string()).collect::<Vec<_>>();
                write!(f, "{}", names.join(", "))
            }
        }
    }
}

impl KernelPolicy {
    /// Validate a raw kernel size against the engine rules and this policy.
    pub fn check(&self, size: i64) -> Result<KernelSize, WorkflowError> {
        let kernel_size = KernelSize::try_from(size)?;
        match self {
            KernelPolicy::OneOf(sizes) if !sizes.contains(&kernel_size) => Err(
                WorkflowError::KernelNotAllowed(kernel_size, self.clone()),
            ),
            _ => Ok(kernel_size),
        }
    }
}

/// Progress of a smoothing session, as shown to the user.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Milestones {
    /// The source image was received and decoded.
    pub uploaded: bool,
    /// The source image was handed to the presenter.
    pub original_displayed: bool,
    /// At least one smoothed image was handed to the presenter.
    pub smoothed_displayed: bool,
}

/// Receives the images produced by a session.
pub trait Presenter {
    /// Show the decoded source image.
    fn present_original(&mut self, image: &Rgba8Image) -> Result<(), WorkflowError>;

    /// Show the source smoothed with `kernel_size`.
    fn present_smoothed(
        &mut self,
        kernel_size: KernelSize,
        image: &Rgba8Image,
    ) -> Result<(), WorkflowError>;
}

/// Writes the presented images as PNG files into a directory.
pub struct PngDirectory {
    dir: PathBuf,
}

impl PngDirectory {
    /// Create the output directory if needed.
    pub fn new(dir: impl Into<PathBuf>) -> Result<Self, WorkflowError> {
        let dir = dir.into();
        std::fs::create_dir_all(&dir).map_err(IoError::from)?;
        Ok(Self { dir })
    }

    fn write(&self, name: &str, image: &Rgba8Image) -> Result<(), WorkflowError> {
        let path = self.dir.join(name);
        F::write_image_png_rgba8(&path, image)?;
        log::info!("wrote {}", path.display());
        Ok(())
    }
}

impl Presenter for PngDirectory {
    fn present_original(&mut self, image: &Rgba8Image) -> Result<(), WorkflowError> {
        self.write("original.png", image)
    }

    fn present_smoothed(
        &mut self,
        kernel_size: KernelSize,
        image: &Rgba8Image,
    ) -> Result<(), WorkflowError> {
        self.write(&format!("smoothed_{kernel_size}.png"), image)
    }
}

/// One decoded source image and the state shown alongside it.
///
/// Every kernel change is an independent engine call on the same source.
pub struct SmoothingSession {
    source: Rgba8Image,
    milestones: Milestones,
    strategy: ExecutionStrategy,
    method: SmoothingMethod,
}

impl SmoothingSession {
    /// Start a session from the bytes of an encoded image.
    pub fn upload(bytes: &[u8]) -> Result<Self, WorkflowError> {
        let source = F::decode_image_rgba8(bytes)?;
        log::info!("uploaded {}", source.size());

        Ok(Self {
            source,
            milestones: Milestones {
                uploaded: true,
                ..Default::default()
            },
            strategy: ExecutionStrategy::default(),
            method: SmoothingMethod::default(),
        })
    }

    /// Set how the engine schedules its work.
    pub fn with_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    /// Set how the engine computes window sums.
    pub fn with_method(mut self, method: SmoothingMethod) -> Self {
        self.method = method;
        self
    }

    /// The decoded source image.
    pub fn source(&self) -> &Rgba8Image {
        &self.source
    }

    /// Current progress.
    pub fn milestones(&self) -> Milestones {
        self.milestones
    }

    /// Hand the source image to the presenter.
    pub fn show_original(&mut self, presenter: &mut impl Presenter) -> Result<(), WorkflowError> {
        presenter.present_original(&self.source)?;
        self.milestones.original_displayed = true;
        Ok(())
    }

    /// Smooth the source with `kernel_size` and hand the result to the presenter.
    pub fn show_smoothed(
        &mut self,
        presenter: &mut impl Presenter,
        kernel_size: KernelSize,
    ) -> Result<Rgba8Image, WorkflowError> {
        let smoothed =
            filter::mean_filter_with(&self.source, kernel_size, self.strategy, self.method)?;
        presenter.present_smoothed(kernel_size, &smoothed)?;
        self.milestones.smoothed_displayed = true;
        log::info!("smoothed with {kernel_size} kernel");
        Ok(smoothed)
    }
}
