//! Model selection by identifier.
//!
//! [`ModelKind`] parses the identifiers accepted on requests, [`OptionModel`]
//! dispatches statically over the four models, and [`ModelRegistry`] holds one
//! configured instance of each, built once and shared across threads.

use std::fmt;
use std::str::FromStr;

use pricer_core::traits::PricingModel;
use pricer_core::types::{MarketInputSet, OptionConfig, PricingError, ValuationResult};

use crate::analytical::{AmericanBlackScholes, EuropeanBlackScholes, DEFAULT_MAX_ITERATIONS};
use crate::lattice::{BinomialTree, DEFAULT_STEPS};
use crate::monte_carlo::{MonteCarlo, DEFAULT_PATHS};

/// Header line of [`ModelRegistry::model_details`].
pub const AVAILABLE_MODELS: &str = "Available Models: European Black-Scholes, Monte Carlo \
                                    Simulation, Binomial Tree, American Black-Scholes";

/// The pricing methods a request can select.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ModelKind {
    /// Closed-form Black-Scholes
    #[default]
    European,
    /// Barone-Adesi-Whaley approximation
    American,
    /// Cox-Ross-Rubinstein lattice
    Binomial,
    /// GBM terminal simulation
    MonteCarlo,
}

impl ModelKind {
    /// All kinds in display order.
    pub const ALL: [ModelKind; 4] = [
        ModelKind::European,
        ModelKind::MonteCarlo,
        ModelKind::Binomial,
        ModelKind::American,
    ];

    /// Canonical identifier.
    pub fn name(self) -> &'static str {
        match self {
            ModelKind::European => EuropeanBlackScholes::MODEL_ID,
            ModelKind::American => AmericanBlackScholes::MODEL_ID,
            ModelKind::Binomial => BinomialTree::MODEL_ID,
            ModelKind::MonteCarlo => MonteCarlo::MODEL_ID,
        }
    }
}

impl fmt::Display for ModelKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ModelKind {
    type Err = PricingError;

    /// Case-insensitive; accepts the canonical identifiers and their long forms.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "european" | "european_black_scholes" | "black_scholes" => Ok(ModelKind::European),
            "american" | "american_black_scholes" => Ok(ModelKind::American),
            "binomial" | "binomial_tree" => Ok(ModelKind::Binomial),
            "monte_carlo" | "monte_carlo_simulation" => Ok(ModelKind::MonteCarlo),
            _ => Err(PricingError::InvalidInput(format!(
                "unknown model identifier '{}'",
                s
            ))),
        }
    }
}

/// Tunables for the numerical models.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelSettings {
    /// Binomial tree time steps
    pub binomial_steps: usize,
    /// Monte Carlo paths per estimate
    pub monte_carlo_paths: usize,
    /// Fixed Monte Carlo seed; `None` draws from entropy
    pub monte_carlo_seed: Option<u64>,
    /// Iteration cap of the early-exercise boundary search
    pub max_iterations: usize,
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            binomial_steps: DEFAULT_STEPS,
            monte_carlo_paths: DEFAULT_PATHS,
            monte_carlo_seed: None,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

/// Static dispatch over the four pricing models.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum OptionModel {
    /// European Black-Scholes
    European(EuropeanBlackScholes),
    /// American Black-Scholes (Barone-Adesi-Whaley)
    American(AmericanBlackScholes),
    /// Binomial tree
    Binomial(BinomialTree),
    /// Monte Carlo simulation
    MonteCarlo(MonteCarlo),
}

impl OptionModel {
    /// Build the model of `kind` from `settings`.
    pub fn build(kind: ModelKind, settings: &ModelSettings) -> Self {
        match kind {
            ModelKind::European => OptionModel::European(EuropeanBlackScholes),
            ModelKind::American => {
                OptionModel::American(AmericanBlackScholes::new(settings.max_iterations))
            }
            ModelKind::Binomial => OptionModel::Binomial(BinomialTree::new(settings.binomial_steps)),
            ModelKind::MonteCarlo => {
                let mc = MonteCarlo::new(settings.monte_carlo_paths);
                OptionModel::MonteCarlo(match settings.monte_carlo_seed {
                    Some(seed) => mc.with_seed(seed),
                    None => mc,
                })
            }
        }
    }

    /// Kind of this model.
    pub fn kind(&self) -> ModelKind {
        match self {
            OptionModel::European(_) => ModelKind::European,
            OptionModel::American(_) => ModelKind::American,
            OptionModel::Binomial(_) => ModelKind::Binomial,
            OptionModel::MonteCarlo(_) => ModelKind::MonteCarlo,
        }
    }
}

impl PricingModel for OptionModel {
    fn model_id(&self) -> &'static str {
        self.kind().name()
    }

    fn calculate(
        &self,
        config: OptionConfig,
        inputs: &MarketInputSet,
    ) -> Result<ValuationResult, PricingError> {
        match self {
            OptionModel::European(m) => m.calculate(config, inputs),
            OptionModel::American(m) => m.calculate(config, inputs),
            OptionModel::Binomial(m) => m.calculate(config, inputs),
            OptionModel::MonteCarlo(m) => m.calculate(config, inputs),
        }
    }

    fn describe(&self) -> String {
        match self {
            OptionModel::European(m) => m.describe(),
            OptionModel::American(m) => m.describe(),
            OptionModel::Binomial(m) => m.describe(),
            OptionModel::MonteCarlo(m) => m.describe(),
        }
    }
}

/// Outcome of resolving a requested model identifier.
#[derive(Debug, Clone, Copy)]
pub struct Resolution<'a> {
    /// Selected model
    pub model: &'a OptionModel,
    /// `true` when the identifier was not recognised and the default was used
    pub fell_back: bool,
}

/// One configured instance of every model.
///
/// # Examples
/// ```
/// use pricer_core::traits::PricingModel;
/// use pricer_models::registry::{ModelKind, ModelRegistry, ModelSettings};
///
/// let registry = ModelRegistry::new(ModelSettings::default());
///
/// let resolved = registry.resolve(Some("Binomial_Tree"));
/// assert_eq!(resolved.model.kind(), ModelKind::Binomial);
/// assert!(!resolved.fell_back);
///
/// let resolved = registry.resolve(Some("heston"));
/// assert_eq!(resolved.model.model_id(), "european");
/// assert!(resolved.fell_back);
/// ```
#[derive(Debug, Clone)]
pub struct ModelRegistry {
    settings: ModelSettings,
    models: [OptionModel; 4],
}

impl Default for ModelRegistry {
    fn default() -> Self {
        Self::new(ModelSettings::default())
    }
}

impl ModelRegistry {
    /// Build every model from `settings`.
    pub fn new(settings: ModelSettings) -> Self {
        let models = ModelKind::ALL.map(|kind| OptionModel::build(kind, &settings));
        Self { settings, models }
    }

    /// Settings the models were built from.
    pub fn settings(&self) -> &ModelSettings {
        &self.settings
    }

    /// The model of `kind`.
    pub fn get(&self, kind: ModelKind) -> &OptionModel {
        let index = ModelKind::ALL
            .iter()
            .position(|k| *k == kind)
            .unwrap_or_default();
        &self.models[index]
    }

    /// Select a model by request identifier.
    ///
    /// An absent or blank identifier selects the European model silently; an
    /// unrecognised one selects it with `fell_back` set so the caller can warn.
    pub fn resolve(&self, identifier: Option<&str>) -> Resolution<'_> {
        match identifier.map(str::trim).filter(|s| !s.is_empty()) {
            None => Resolution {
                model: self.get(ModelKind::default()),
                fell_back: false,
            },
            Some(id) => match id.parse::<ModelKind>() {
                Ok(kind) => Resolution {
                    model: self.get(kind),
                    fell_back: false,
                },
                Err(_) => Resolution {
                    model: self.get(ModelKind::default()),
                    fell_back: true,
                },
            },
        }
    }

    /// Iterate over the models in display order.
    pub fn iter(&self) -> impl Iterator<Item = &OptionModel> {
        self.models.iter()
    }

    /// Human-readable summary of the available models.
    pub fn model_details(&self) -> String {
        let mut details = String::from(AVAILABLE_MODELS);
        for model in self.iter() {
            details.push('\n');
            details.push_str(&model.describe());
        }
        details
    }
}
