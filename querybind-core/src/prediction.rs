//! Predictive model registration for queries.
//!
//! Query expressions may call a prediction function that feeds a document of
//! inputs to a registered model and matches on the returned outputs. This
//! module holds the registry those expressions resolve against: models are
//! registered under a name, looked up by the execution layer when a
//! prediction is evaluated, and unregistered when no longer needed.

use std::{
    collections::HashMap,
    sync::{Arc, PoisonError, RwLock},
};

use bson::Document;

/// A model that can service prediction calls inside query expressions.
///
/// Implementations receive the input dictionary built by the query and return
/// the predicted outputs, or `None` when no prediction can be made for the
/// given input.
pub trait PredictiveModel: Send + Sync {
    /// Produces a prediction for the given input document.
    fn predict(&self, input: &Document) -> Option<Document>;
}

/// A thread-safe name-to-model registry.
///
/// Registration and lookup may happen from any thread; the registry is meant
/// to be shared (typically behind an `Arc`) between the code that manages
/// models and the execution layer that resolves them.
///
/// # Example
///
/// ```ignore
/// use querybind_core::prediction::{PredictionRegistry, PredictiveModel};
/// use bson::{Document, doc};
///
/// struct EchoModel;
///
/// impl PredictiveModel for EchoModel {
///     fn predict(&self, input: &Document) -> Option<Document> {
///         Some(input.clone())
///     }
/// }
///
/// let registry = PredictionRegistry::new();
/// registry.register("echo", EchoModel);
///
/// let model = registry.model("echo").unwrap();
/// assert_eq!(model.predict(&doc! { "a": 1 }), Some(doc! { "a": 1 }));
/// ```
#[derive(Default)]
pub struct PredictionRegistry {
    models: RwLock<HashMap<String, Arc<dyn PredictiveModel>>>,
}

impl PredictionRegistry {
    /// Creates a registry with no models.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `model` under `name`, replacing any model previously
    /// registered under that name.
    pub fn register<M: PredictiveModel + 'static>(&self, name: impl Into<String>, model: M) {
        self.models
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.into(), Arc::new(model));
    }

    /// Removes the model registered under `name`.
    ///
    /// Unregistering a name with no model is a no-op.
    pub fn unregister(&self, name: &str) {
        self.models
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);
    }

    /// Resolves the model registered under `name`.
    ///
    /// This is the hook the execution layer calls when it evaluates a
    /// prediction; the returned handle stays valid even if the model is
    /// unregistered while a prediction is in flight.
    pub fn model(&self, name: &str) -> Option<Arc<dyn PredictiveModel>> {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// Returns the registered model names, in no particular order.
    pub fn model_names(&self) -> Vec<String> {
        self.models
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .keys()
            .cloned()
            .collect()
    }
}
