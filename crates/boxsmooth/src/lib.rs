#![doc = include_str!(concat!("../", env!("CARGO_PKG_README")))]

#[doc(inline)]
pub use boxsmooth_image as image;

#[doc(inline)]
pub use boxsmooth_imgproc as imgproc;

#[doc(inline)]
pub use boxsmooth_io as io;
