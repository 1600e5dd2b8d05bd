pub mod analysis;
pub mod antialias;
pub mod composite;
pub mod metrics;
pub mod normalize;
pub mod pixel;
pub mod settings;
pub mod similarity;
pub mod tolerance;
pub mod transform;

use tracing::debug;

use self::analysis::{ImageAnalysis, analyze_buffer};
use self::composite::composite;
use self::metrics::{ComparisonResult, DimensionReport, aggregate};
use self::normalize::{pad_to, target_dimensions};
use self::pixel::ImageBuffer;
use self::settings::ComparisonConfig;
use self::tolerance::TolerancePreset;
use crate::error::LoadError;
use crate::source::{ImageSource, load_pair};

/// A finished comparison, or the reason it never started.
pub type ComparisonOutcome = Result<ComparisonResult, LoadError>;

/// Callback notified once per completed run.
pub type Listener = Box<dyn FnMut(&ComparisonOutcome) + Send>;

/// Compare two decoded images.
///
/// Runs synchronously. Async callers should go through [`compare`] or
/// [`Comparison`], which move the scan onto the blocking pool.
///
/// Sizes are reconciled by padding the smaller image with transparent black,
/// so a size change shows up as mismatching pixels rather than an error.
pub fn compare_buffers(
    one: &ImageBuffer,
    two: &ImageBuffer,
    config: &ComparisonConfig,
) -> ComparisonResult {
    let dimensions = DimensionReport::new(one.dimensions(), two.dimensions());
    let (width, height) = target_dimensions(one, two);
    if !dimensions.is_same_dimensions {
        debug!(
            one = ?one.dimensions(),
            two = ?two.dimensions(),
            width,
            height,
            "normalizing dimensions"
        );
    }

    let one = pad_to(one, width, height);
    let two = pad_to(two, width, height);
    aggregate(composite(&one, &two, config), dimensions)
}

/// Load both sources concurrently, then compare them.
pub async fn compare(
    one: impl Into<ImageSource>,
    two: impl Into<ImageSource>,
    config: &ComparisonConfig,
) -> ComparisonOutcome {
    let (one, two) = load_pair(one.into(), two.into()).await?;
    let (result, _, _) = scan_blocking(one, two, *config).await?;
    Ok(result)
}

/// Run the synchronous scan on the blocking pool and hand the inputs back.
async fn scan_blocking(
    one: ImageBuffer,
    two: ImageBuffer,
    config: ComparisonConfig,
) -> Result<(ComparisonResult, ImageBuffer, ImageBuffer), LoadError> {
    tokio::task::spawn_blocking(move || {
        let result = compare_buffers(&one, &two, &config);
        (result, one, two)
    })
    .await
    .map_err(|_| LoadError::Join {
        what: "comparison".to_string(),
    })
}

/// Average color and brightness of a single image.
pub async fn analyze(source: impl Into<ImageSource>) -> Result<ImageAnalysis, LoadError> {
    let image = source.into().load().await?;
    Ok(analyze_buffer(&image))
}

/// A comparison between two fixed inputs that can be re-run with new
/// settings.
///
/// Inputs are decoded on the first successful run and reused afterwards.
/// Every run notifies all listeners, in registration order, before
/// returning. Listeners only see the outcome, never the session, so they
/// cannot start a nested run.
pub struct Comparison {
    one: ImageSource,
    two: ImageSource,
    loaded: Option<(ImageBuffer, ImageBuffer)>,
    config: ComparisonConfig,
    listeners: Vec<Listener>,
}

impl Comparison {
    pub fn new(one: impl Into<ImageSource>, two: impl Into<ImageSource>) -> Self {
        Self {
            one: one.into(),
            two: two.into(),
            loaded: None,
            config: ComparisonConfig::default(),
            listeners: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: ComparisonConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ComparisonConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut ComparisonConfig {
        &mut self.config
    }

    pub fn apply_preset(&mut self, preset: TolerancePreset) -> &mut Self {
        self.config.apply_preset(preset);
        self
    }

    pub fn on_complete(
        &mut self,
        listener: impl FnMut(&ComparisonOutcome) + Send + 'static,
    ) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Load (if needed), compare with the current config, notify listeners.
    pub async fn run(&mut self) -> ComparisonOutcome {
        let outcome = self.run_inner().await;
        debug!(
            listeners = self.listeners.len(),
            ok = outcome.is_ok(),
            "notifying listeners"
        );
        for listener in &mut self.listeners {
            listener(&outcome);
        }
        outcome
    }

    /// Re-run against the same inputs, typically after changing the config.
    pub async fn repaint(&mut self) -> ComparisonOutcome {
        self.run().await
    }

    async fn run_inner(&mut self) -> ComparisonOutcome {
        let (one, two) = match self.loaded.take() {
            Some(pair) => pair,
            None => load_pair(self.one.clone(), self.two.clone()).await?,
        };
        let (result, one, two) = scan_blocking(one, two, self.config).await?;
        self.loaded = Some((one, two));
        Ok(result)
    }
}
