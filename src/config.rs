//! Engine configuration shared by a tree of nodes.
//!
//! A [`Config`] is a cheap cloneable handle. Every node keeps one, and all
//! nodes that should lay out consistently (same defaults, same pixel grid,
//! same experiments) should share one. The config also carries the layout
//! generation counter and the node instance counter for its trees, so two
//! independent configs never interfere with each other.

use crate::error::ConfigError;
use crate::error::Result;
use crate::tree::Node;
use std::cell::Cell;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;

/// Severity of an engine log message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
  Error,
  Warn,
  Info,
  Debug,
  Verbose,
  /// Logged and then escalated to a panic
  Fatal,
}

impl fmt::Display for LogLevel {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let name = match self {
      LogLevel::Error => "error",
      LogLevel::Warn => "warn",
      LogLevel::Info => "info",
      LogLevel::Debug => "debug",
      LogLevel::Verbose => "verbose",
      LogLevel::Fatal => "fatal",
    };
    write!(f, "{}", name)
  }
}

/// Opt-in behaviors that are not stable yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentalFeature {
  /// Recompute the flex basis of already-measured children on every
  /// generation instead of reusing the cached value
  WebFlexBasis,
}

/// Log sink invoked for every engine message.
pub type LogFn = Rc<dyn Fn(LogLevel, &str)>;

/// Invoked when copy-on-write duplicates a child. Arguments are the node
/// that was copied, its replacement, the owner the replacement was attached
/// to, and the child index.
pub type CloneNodeFn = Rc<dyn Fn(&Node, &Node, &Node, usize)>;

static CONFIG_INSTANCE_COUNT: AtomicI32 = AtomicI32::new(0);

struct ConfigInner {
  experimental_web_flex_basis: Cell<bool>,
  use_web_defaults: Cell<bool>,
  use_legacy_stretch: Cell<bool>,
  point_scale_factor: Cell<f32>,
  logger: RefCell<Option<LogFn>>,
  clone_node_callback: RefCell<Option<CloneNodeFn>>,
  generation: Cell<u32>,
  node_instances: Cell<i32>,
}

impl Drop for ConfigInner {
  fn drop(&mut self) {
    CONFIG_INSTANCE_COUNT.fetch_sub(1, Ordering::Relaxed);
  }
}

/// Shared engine configuration. See the module docs.
///
/// # Examples
///
/// ```
/// use fastflex::Config;
///
/// let config = Config::new();
/// config.set_point_scale_factor(2.0);
/// assert_eq!(config.point_scale_factor(), 2.0);
/// ```
#[derive(Clone)]
pub struct Config {
  inner: Rc<ConfigInner>,
}

impl Default for Config {
  fn default() -> Self {
    Self::new()
  }
}

impl Config {
  /// Creates a config with default settings: scale factor 1, no
  /// experiments, engine-classic style defaults.
  pub fn new() -> Self {
    CONFIG_INSTANCE_COUNT.fetch_add(1, Ordering::Relaxed);
    Self {
      inner: Rc::new(ConfigInner {
        experimental_web_flex_basis: Cell::new(false),
        use_web_defaults: Cell::new(false),
        use_legacy_stretch: Cell::new(false),
        point_scale_factor: Cell::new(1.0),
        logger: RefCell::new(None),
        clone_node_callback: RefCell::new(None),
        generation: Cell::new(0),
        node_instances: Cell::new(0),
      }),
    }
  }

  /// Number of live configs in the process
  pub fn instance_count() -> i32 {
    CONFIG_INSTANCE_COUNT.load(Ordering::Relaxed)
  }

  /// Number of live nodes created with this config
  pub fn node_instance_count(&self) -> i32 {
    self.inner.node_instances.get()
  }

  /// Returns true when both handles point at the same config
  pub fn ptr_eq(&self, other: &Config) -> bool {
    Rc::ptr_eq(&self.inner, &other.inner)
  }

  /// Builder twin of [`Config::set_experimental_feature_enabled`].
  pub fn with_experimental_feature(self, feature: ExperimentalFeature, enabled: bool) -> Self {
    self.set_experimental_feature_enabled(feature, enabled);
    self
  }

  /// Builder twin of [`Config::set_use_web_defaults`].
  pub fn with_web_defaults(self, enabled: bool) -> Self {
    self.set_use_web_defaults(enabled);
    self
  }

  /// Builder twin of [`Config::set_use_legacy_stretch`].
  pub fn with_legacy_stretch(self, enabled: bool) -> Self {
    self.set_use_legacy_stretch(enabled);
    self
  }

  /// Builder twin of [`Config::set_point_scale_factor`].
  pub fn with_point_scale_factor(self, factor: f32) -> Self {
    self.set_point_scale_factor(factor);
    self
  }

  pub fn set_experimental_feature_enabled(&self, feature: ExperimentalFeature, enabled: bool) {
    match feature {
      ExperimentalFeature::WebFlexBasis => self.inner.experimental_web_flex_basis.set(enabled),
    }
  }

  pub fn is_experimental_feature_enabled(&self, feature: ExperimentalFeature) -> bool {
    match feature {
      ExperimentalFeature::WebFlexBasis => self.inner.experimental_web_flex_basis.get(),
    }
  }

  /// When set, new nodes start from [`crate::style::Style::web_default`]
  /// and shrink defaults to one.
  pub fn set_use_web_defaults(&self, enabled: bool) {
    self.inner.use_web_defaults.set(enabled);
  }

  pub fn use_web_defaults(&self) -> bool {
    self.inner.use_web_defaults.get()
  }

  /// Restores the old behavior where a container with only non-growing
  /// children still distributes its free space to them on stretch.
  pub fn set_use_legacy_stretch(&self, enabled: bool) {
    self.inner.use_legacy_stretch.set(enabled);
  }

  pub fn use_legacy_stretch(&self) -> bool {
    self.inner.use_legacy_stretch.get()
  }

  /// Sets the device pixel scale used for pixel-grid rounding.
  ///
  /// A factor of zero disables rounding entirely.
  ///
  /// # Panics
  ///
  /// Panics if `factor` is negative.
  pub fn set_point_scale_factor(&self, factor: f32) {
    if let Err(err) = self.try_set_point_scale_factor(factor) {
      self.log(LogLevel::Fatal, &format!("{}", err));
    }
  }

  /// Fallible twin of [`Config::set_point_scale_factor`].
  pub fn try_set_point_scale_factor(&self, factor: f32) -> Result<()> {
    if factor < 0.0 {
      return Err(ConfigError::NegativePointScale { factor }.into());
    }
    self.inner.point_scale_factor.set(factor);
    Ok(())
  }

  pub fn point_scale_factor(&self) -> f32 {
    self.inner.point_scale_factor.get()
  }

  /// Replaces the log sink. `None` restores the default sink, which writes
  /// errors to stderr and everything else to stdout.
  pub fn set_logger(&self, logger: Option<LogFn>) {
    *self.inner.logger.borrow_mut() = logger;
  }

  /// Routes a message through the current log sink.
  ///
  /// # Panics
  ///
  /// A [`LogLevel::Fatal`] message panics after it has been logged.
  pub fn log(&self, level: LogLevel, message: &str) {
    let logger = self.inner.logger.borrow().clone();
    match logger {
      Some(logger) => logger(level, message),
      None => default_logger(level, message),
    }
    if level == LogLevel::Fatal {
      panic!("{}", message);
    }
  }

  /// Registers a callback fired every time copy-on-write clones a child
  /// into a freshly owned child list.
  pub fn set_clone_node_callback(&self, callback: Option<CloneNodeFn>) {
    *self.inner.clone_node_callback.borrow_mut() = callback;
  }

  pub(crate) fn clone_node_callback(&self) -> Option<CloneNodeFn> {
    self.inner.clone_node_callback.borrow().clone()
  }

  pub(crate) fn retain_node_instance(&self) {
    self.inner.node_instances.set(self.inner.node_instances.get() + 1);
  }

  pub(crate) fn release_node_instance(&self) {
    self.inner.node_instances.set(self.inner.node_instances.get() - 1);
  }

  /// Starts a new layout generation and returns its number.
  pub(crate) fn next_generation(&self) -> u32 {
    let next = self.inner.generation.get().wrapping_add(1);
    self.inner.generation.set(next);
    next
  }

  pub(crate) fn current_generation(&self) -> u32 {
    self.inner.generation.get()
  }
}

impl fmt::Debug for Config {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("Config")
      .field("point_scale_factor", &self.point_scale_factor())
      .field("use_web_defaults", &self.use_web_defaults())
      .field("use_legacy_stretch", &self.use_legacy_stretch())
      .field(
        "experimental_web_flex_basis",
        &self.is_experimental_feature_enabled(ExperimentalFeature::WebFlexBasis),
      )
      .field("node_instances", &self.node_instance_count())
      .finish()
  }
}

fn default_logger(level: LogLevel, message: &str) {
  match level {
    LogLevel::Error | LogLevel::Fatal => eprintln!("{}", message),
    _ => println!("{}", message),
  }
}
