//! Browser implementations of the binding seams.

use tpc_core::config::ChartConfig;
use tpc_core::error::RenderError;
use tpc_core::host::HostElement;
use tpc_core::renderer::ChartRenderer;
use tpc_core::trade::ChartPoint;

use crate::js_bridge;

/// Live Chart.js instance, addressed by its canvas id.
#[derive(Debug)]
pub struct ChartJsHandle {
    canvas_id: String,
}

impl ChartJsHandle {
    pub fn canvas_id(&self) -> &str {
        &self.canvas_id
    }
}

/// Draws charts with Chart.js through [`js_bridge`].
#[derive(Debug, Clone, Copy)]
pub struct ChartJsRenderer;

impl ChartJsRenderer {
    /// Load the glue script (and Chart.js if the page lacks it).
    pub fn new() -> Self {
        js_bridge::load_chart_library();
        js_bridge::init_chart_scripts();
        Self
    }
}

impl ChartRenderer for ChartJsRenderer {
    type Handle = ChartJsHandle;

    fn create(
        &mut self,
        surface: &str,
        config: &ChartConfig,
        points: &[ChartPoint],
    ) -> Result<ChartJsHandle, RenderError> {
        if element_by_id(surface).is_none() {
            return Err(RenderError::SurfaceNotFound(surface.to_string()));
        }
        let config_json = serde_json::to_string(&config.to_library_config(points))
            .map_err(|e| RenderError::Config(e.to_string()))?;
        js_bridge::create_chart(surface, &config_json)?;
        Ok(ChartJsHandle {
            canvas_id: surface.to_string(),
        })
    }

    fn replace_series_data(&mut self, handle: &mut ChartJsHandle, points: &[ChartPoint]) {
        match serde_json::to_string(points) {
            Ok(data_json) => js_bridge::update_chart(&handle.canvas_id, &data_json),
            Err(e) => log::error!("[TPC] failed to serialize chart points: {e}"),
        }
    }

    fn release(&mut self, handle: ChartJsHandle) {
        js_bridge::destroy_chart(&handle.canvas_id);
    }
}

/// A DOM element hosting a chart.
#[derive(Debug, Clone)]
pub struct DomElement(pub web_sys::Element);

impl DomElement {
    /// Find the element with DOM id `id` in the current document.
    pub fn find(id: &str) -> Option<Self> {
        element_by_id(id).map(DomElement)
    }
}

impl HostElement for DomElement {
    fn attribute(&self, name: &str) -> Option<String> {
        self.0.get_attribute(name)
    }

    fn surface_id(&self) -> String {
        self.0.id()
    }
}

/// Look up an element in the current document.
pub fn element_by_id(id: &str) -> Option<web_sys::Element> {
    web_sys::window()
        .and_then(|window| window.document())
        .and_then(|document| document.get_element_by_id(id))
}
