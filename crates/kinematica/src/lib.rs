#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use kinematica_linalg as linalg;

#[doc(inline)]
pub use kinematica_lie as lie;

#[doc(inline)]
pub use kinematica_robot as robot;

#[doc(inline)]
pub use kinematica_scene as scene;
