// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

/*!
Finder-chart footprints for HiPERCAM and its COMPO pick-off/injector assembly.

Given a telescope pointing, a position angle and the world coordinate system of
a sky image, [`build_footprint`] produces the detector window, the COMPO
patrol arc, the unvignetted region and the pickoff/injector arm silhouettes as
plain pixel-space shapes, ready for any renderer.
 */

pub mod acquire;
mod cli;
pub mod constants;
pub mod coord;
pub mod footprint;
pub mod math;
#[cfg(feature = "plotting")]
pub mod plotting;
pub mod scene;
pub mod sexagesimal;
pub mod unit_parsing;
pub mod wcs;

// Re-exports.
pub use cli::{Finder, FinderError};
pub use coord::{Angle, AngleUnit, PixelPoint, Pointing, SkyPoint};
pub use footprint::{
    build_footprint, ArmSettings, CalibrationLoadError, FootprintError, FreeRegionTable,
    InjectorSide, Instrument, InstrumentConstants, InstrumentMode, WindowSpec,
};
pub use scene::{CompoundShape, Footprint, Overlay, Shape, ShapeName};
pub use wcs::{LinearWcs, Projection, ProjectionError, TanWcs};
