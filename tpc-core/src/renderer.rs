//! Seam between [`ChartBinding`](crate::binding::ChartBinding) and whatever
//! library draws the chart.

use crate::config::ChartConfig;
use crate::error::RenderError;
use crate::trade::ChartPoint;

/// A charting backend able to draw one time-scaled price series per surface.
pub trait ChartRenderer {
    /// Live chart instance bound to one surface.
    type Handle;

    /// Build a chart on `surface` showing `points`.
    fn create(
        &mut self,
        surface: &str,
        config: &ChartConfig,
        points: &[ChartPoint],
    ) -> Result<Self::Handle, RenderError>;

    /// Replace the whole series of an existing chart and redraw it.
    fn replace_series_data(&mut self, handle: &mut Self::Handle, points: &[ChartPoint]);

    /// Tear the chart down. Consumes the handle.
    fn release(&mut self, handle: Self::Handle);
}
