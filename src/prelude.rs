//! Common imports for working with the controller library.

pub use crate::config::ControllerConfig;
pub use crate::controller::reconciler::{reconcile, Reconciler, ReconcilerError};
pub use crate::crd::{
    NamedParameterRef, ParameterStore, ParameterStoreSpec, ParameterStoreStatus, Phase,
    SingleParameterRef, ValueFrom,
};
pub use crate::provider::aws::AwsParameterStore;
pub use crate::provider::memory::InMemoryParameterStore;
pub use crate::provider::{Parameter, ParameterStoreBackend, PathListing, StoreError};
pub use crate::resolver::{
    normalize, synthesize, DesiredSecretPayload, ResolutionError, ResolvedValues, Synthesis,
};
