mod arrangement;
mod objects;
mod scheduling;

#[doc(inline)]
pub use arrangement::Arrangement;
#[doc(inline)]
pub use arrangement::ArrangementJob;
#[doc(inline)]
pub use arrangement::Placement;
#[doc(inline)]
pub use arrangement::PlacementOutcome;
#[doc(inline)]
pub use objects::ArrangeObject;
#[doc(inline)]
pub use scheduling::CancelToken;
#[doc(inline)]
pub use scheduling::Yielder;
