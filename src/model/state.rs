/// A marker type indicating that a model is **not yet trained**.
///
/// Used in generic parameters (e.g., `MlpRegressor<B, Unfitted>`) to enforce
/// compile-time guarantees: training requires an `Unfitted` model, and
/// `predict` is simply not available until the model is converted to
/// `Fitted`. This prevents accidental use of an untrained model.
pub struct Unfitted;

/// A marker type indicating that a model has been **fully trained**.
///
/// After training, a model is converted from `Model<Unfitted>` to
/// `Model<Fitted>`, which implements
/// [`InferenceModel`](crate::model::InferenceModel) and can be serialized or
/// used for prediction. A `Fitted` model carries only inference parameters.
pub struct Fitted;
