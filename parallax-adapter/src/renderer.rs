use alloc::boxed::Box;
use alloc::vec::Vec;
use core::marker::PhantomData;

use parallax::{Axis, Error, LayerConfig, Result};

use crate::{AnimationDriver, ScrollSource, TargetElement};

/// Placeholder the canvas shows for a layer with no linked content.
pub const EMPTY_LAYER_PLACEHOLDER: &str = "Link a Layer to Parallax";

/// Where the host is rendering the layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum RenderTarget {
    /// Interactive preview: layers follow the scroll position.
    Preview,
    /// Static design canvas: layers show their animation bounds.
    Canvas,
}

/// A guide line marking one end of a layer's scroll range.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundGuide {
    /// The guide runs across this axis: `X` places it at `left`, `Y` at `top`.
    pub axis: Axis,
    pub position: f64,
}

/// Decorations a renderer asks the host to draw around the layer.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Overlay {
    pub guides: Vec<BoundGuide>,
    pub placeholder: Option<&'static str>,
}

/// One way of presenting an animated layer. The host picks a variant once via
/// [`select_renderer`].
pub trait Renderer {
    type Element: TargetElement;

    fn target(&self) -> RenderTarget;

    fn mount(&mut self, element: Option<&Self::Element>) -> Result<()>;

    fn unmount(&mut self);

    fn overlay(&self) -> Overlay;
}

/// Drives the layer from the scroll source.
///
/// A missing element is logged and retried on the next mount instead of being reported.
#[derive(Debug)]
pub struct PreviewRenderer<S: ScrollSource, E: TargetElement>
where
    E::Timeline: 'static,
{
    driver: AnimationDriver<S, E::Timeline>,
}

impl<S: ScrollSource, E: TargetElement> PreviewRenderer<S, E>
where
    E::Timeline: 'static,
{
    pub fn new(config: LayerConfig, source: S) -> Self {
        Self {
            driver: AnimationDriver::new(config, source),
        }
    }

    pub fn driver(&self) -> &AnimationDriver<S, E::Timeline> {
        &self.driver
    }
}

impl<S: ScrollSource, E: TargetElement> Renderer for PreviewRenderer<S, E>
where
    E::Timeline: 'static,
{
    type Element = E;

    fn target(&self) -> RenderTarget {
        RenderTarget::Preview
    }

    fn mount(&mut self, element: Option<&E>) -> Result<()> {
        match self.driver.mount(element) {
            Err(Error::MissingTargetElement) => {
                pdebug!("PreviewRenderer::mount: deferred until element exists");
                Ok(())
            }
            other => other,
        }
    }

    fn unmount(&mut self) {
        self.driver.unmount();
    }

    fn overlay(&self) -> Overlay {
        Overlay::default()
    }
}

/// Static presentation for the design canvas: no timeline, just range guides.
#[derive(Debug)]
pub struct CanvasRenderer<E> {
    config: LayerConfig,
    has_content: bool,
    _element: PhantomData<fn(&E)>,
}

impl<E> CanvasRenderer<E> {
    pub fn new(config: LayerConfig, has_content: bool) -> Self {
        Self {
            config,
            has_content,
            _element: PhantomData,
        }
    }
}

impl<E: TargetElement> Renderer for CanvasRenderer<E> {
    type Element = E;

    fn target(&self) -> RenderTarget {
        RenderTarget::Canvas
    }

    fn mount(&mut self, _element: Option<&E>) -> Result<()> {
        Ok(())
    }

    fn unmount(&mut self) {}

    fn overlay(&self) -> Overlay {
        let axis = self.config.axis;
        let guides = if self.config.show_bounds {
            [self.config.range.from, self.config.range.to]
                .into_iter()
                .map(|position| BoundGuide { axis, position })
                .collect()
        } else {
            Vec::new()
        };
        Overlay {
            guides,
            placeholder: (!self.has_content).then_some(EMPTY_LAYER_PLACEHOLDER),
        }
    }
}

/// Picks the renderer variant for `target`.
pub fn select_renderer<S, E>(
    target: RenderTarget,
    config: LayerConfig,
    source: S,
    has_content: bool,
) -> Box<dyn Renderer<Element = E>>
where
    S: ScrollSource + 'static,
    E: TargetElement + 'static,
    E::Timeline: 'static,
{
    match target {
        RenderTarget::Preview => Box::new(PreviewRenderer::<S, E>::new(config, source)),
        RenderTarget::Canvas => Box::new(CanvasRenderer::<E>::new(config, has_content)),
    }
}
