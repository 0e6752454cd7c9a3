//! Polyfill decision and the `<use>` component
//!
//! Rendering is split in two phases. `render` is pure with respect to the
//! sprite machinery: it decides between the native and the polyfilled shape
//! and builds the placeholder. `synchronize` is the side-effecting
//! post-attach step that loads the sprite and transplants the symbol; it
//! talks to sprites only through [`SpriteSource`].

use std::rc::Rc;

use sprite_dom::{
    DisplaySurface, DomResult, DomTree, InternedString, NodeId, QualName, SVG_NAMESPACE,
    XLINK_NAMESPACE,
};

use crate::{
    Diagnostics, EnvironmentDetector, SpriteDocument, SpriteRef, SpriteSource, insert_symbol,
};

/// How an instance renders; fixed for its lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// `<svg><use href="…"/></svg>`, rendered by the runtime itself
    Native,
    /// An inert `<svg>` populated from the fetched sprite
    Polyfilled,
}

impl RenderMode {
    pub fn decide(force_polyfill: bool, detector: &EnvironmentDetector) -> Self {
        if force_polyfill || detector.requires_polyfill() {
            Self::Polyfilled
        } else {
            Self::Native
        }
    }
}

/// Input of a `<use>` instance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UseProps {
    /// `url#symbol`, `url` or `#symbol`
    pub href: Option<String>,
    /// Legacy `xlink:href`, used when `href` is absent
    pub xlink_href: Option<String>,
    /// Polyfill regardless of the environment
    pub force_polyfill: bool,
    /// Attributes passed through to the rendered `<svg>`
    pub attributes: Vec<(String, String)>,
}

impl UseProps {
    pub fn new(href: impl Into<String>) -> Self {
        Self {
            href: Some(href.into()),
            ..Default::default()
        }
    }

    /// Props carrying only the legacy `xlink:href`
    pub fn xlink(href: impl Into<String>) -> Self {
        Self {
            xlink_href: Some(href.into()),
            ..Default::default()
        }
    }

    pub fn with_xlink_href(mut self, href: impl Into<String>) -> Self {
        self.xlink_href = Some(href.into());
        self
    }

    /// The effective link: `href`, else `xlink_href`
    pub fn link(&self) -> Option<&str> {
        self.href.as_deref().or(self.xlink_href.as_deref())
    }

    pub fn force(mut self, force: bool) -> Self {
        self.force_polyfill = force;
        self
    }

    pub fn attribute(mut self, name: &str, value: &str) -> Self {
        self.attributes.push((name.to_string(), value.to_string()));
        self
    }
}

/// Result of a synchronization pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Nothing to do: native mode, no surface, no reference, or already current
    Skipped,
    /// The symbol was transplanted
    Inserted,
    /// The sprite loaded but has no such symbol; the surface is unchanged
    MissingSymbol,
    /// The surface went away before the sprite arrived
    Detached,
    /// The sprite could not be loaded
    Failed,
}

/// One `<use>` instance
pub struct PolyfillUse<S> {
    mode: RenderMode,
    props: UseProps,
    reference: SpriteRef,
    surface: Option<S>,
    synced: Option<SpriteRef>,
    local: Option<Rc<SpriteDocument>>,
    diagnostics: Rc<Diagnostics>,
}

impl<S: DisplaySurface> PolyfillUse<S> {
    /// Create an instance; the render mode is decided here, once
    pub fn new(props: UseProps, detector: &EnvironmentDetector, diagnostics: Rc<Diagnostics>) -> Self {
        let mode = RenderMode::decide(props.force_polyfill, detector);
        let reference = SpriteRef::parse(props.link(), &diagnostics);

        Self {
            mode,
            props,
            reference,
            surface: None,
            synced: None,
            local: None,
            diagnostics,
        }
    }

    /// Document that `#symbol` references without a URL resolve against
    pub fn with_local_document(mut self, document: Rc<SpriteDocument>) -> Self {
        self.local = Some(document);
        self
    }

    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    pub fn props(&self) -> &UseProps {
        &self.props
    }

    pub fn reference(&self) -> &SpriteRef {
        &self.reference
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    /// Build the placeholder under `parent` and return the `<svg>` node
    pub fn render(&self, tree: &mut DomTree, parent: NodeId) -> DomResult<NodeId> {
        let svg = tree.create_element_ns(SVG_NAMESPACE, "svg");
        for (name, value) in &self.props.attributes {
            tree.set_attribute(svg, name, value)?;
        }

        if self.mode == RenderMode::Native {
            let use_el = tree.create_element_ns(SVG_NAMESPACE, "use");
            let interner = tree.interner_mut();
            let xlink_href = QualName::new(interner.intern(XLINK_NAMESPACE), interner.intern("href"))
                .with_prefix(interner.intern("xlink"));
            let href = self.props.link().unwrap_or_default();
            tree.set_attribute_qualified(use_el, xlink_href, href)?;
            tree.append_child(svg, use_el)?;
        }

        tree.append_child(parent, svg)?;
        Ok(svg)
    }

    /// Hand over the rendered surface once it is attached
    pub fn attach(&mut self, surface: S) {
        self.surface = Some(surface);
        self.synced = None;
    }

    /// Release the surface, e.g. when the host tears the instance down
    pub fn detach(&mut self) -> Option<S> {
        self.synced = None;
        self.surface.take()
    }

    /// Apply new props; the render mode stays as first decided
    pub fn update(&mut self, props: UseProps) {
        self.reference = SpriteRef::parse(props.link(), &self.diagnostics);
        self.props = props;
    }

    /// Whether `synchronize` would do any work
    pub fn needs_sync(&self) -> bool {
        self.mode == RenderMode::Polyfilled
            && self.surface.is_some()
            && !self.reference.is_empty()
            && self.synced.as_ref() != Some(&self.reference)
    }

    /// Load the referenced sprite and transplant the symbol into the surface
    pub async fn synchronize<L>(&mut self, source: &L) -> SyncOutcome
    where
        L: SpriteSource + ?Sized,
    {
        if !self.needs_sync() {
            return SyncOutcome::Skipped;
        }
        let reference = self.reference.clone();

        let document = if reference.needs_fetch() {
            match source.load(&reference.url).await {
                Ok(document) => document,
                Err(err) => {
                    tracing::debug!("Sprite {} unavailable: {}", reference.url, err);
                    return SyncOutcome::Failed;
                }
            }
        } else {
            match &self.local {
                Some(local) => local.clone(),
                None => return SyncOutcome::Skipped,
            }
        };

        let Some(surface) = self.surface.as_mut() else {
            return SyncOutcome::Detached;
        };
        if !surface.is_attached() {
            tracing::debug!("Surface for {} detached before the sprite arrived", reference);
            return SyncOutcome::Detached;
        }

        if insert_symbol(&document, surface, &reference.symbol_id) {
            self.synced = Some(reference);
            SyncOutcome::Inserted
        } else {
            SyncOutcome::MissingSymbol
        }
    }
}

/// `xlink:href` of the `<use>` element of a natively rendered instance
pub fn native_href(tree: &DomTree, svg: NodeId) -> Option<&str> {
    let (use_el, _) = tree
        .children(svg)
        .find(|(id, _)| tree.tag_name(*id) == Some("use"))?;
    let elem = tree.element(use_el)?;
    elem.attrs
        .iter()
        .find(|a| tree.resolve(a.name.local) == "href" && a.name.prefix != InternedString::EMPTY)
        .map(|a| a.value.as_str())
}
