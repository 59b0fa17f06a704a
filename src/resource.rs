//! Loaded template resources and the loader contract
//!
//! A [`Resource`] is one named unit of template content together with the
//! identity of the loader that produced it. Loaders themselves live outside
//! this crate; [`ResourceLoader`] is the contract the include machinery
//! fetches through. Resources are created per fetch and never cached here.

use crate::error::RenderError;

/// Identity of the loader a resource came from.
///
/// The identity decides the path-separator convention used when an include
/// path is resolved relative to the resource: classpath-style names always
/// use `/`, everything else uses the platform separator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoaderKind {
    /// Filesystem loader
    File,
    /// Classpath-style loader with `/`-separated names
    Classpath,
    /// Archive loader (zip/jar style)
    Archive,
}

impl LoaderKind {
    /// Separator character used within this loader's resource names
    pub fn path_separator(&self) -> char {
        match self {
            LoaderKind::Classpath => '/',
            LoaderKind::File | LoaderKind::Archive => std::path::MAIN_SEPARATOR,
        }
    }
}

/// A named, loaded unit of template content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    name: String,
    content: String,
    loader: LoaderKind,
}

impl Resource {
    /// Create a resource as a loader would hand it out
    pub fn new(name: impl Into<String>, content: impl Into<String>, loader: LoaderKind) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
            loader,
        }
    }

    /// Template name this resource was fetched under
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw content of the resource
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Identity of the loader that produced this resource
    pub fn loader(&self) -> LoaderKind {
        self.loader
    }
}

/// Contract for fetching template content by name.
///
/// Implementations (filesystem, classpath, archive) are supplied by the
/// embedding engine. A missing resource must be reported as
/// [`RenderError::ResourceNotFound`] so the include directive can rethrow it
/// unchanged.
pub trait ResourceLoader {
    /// Fetch the resource at `path`, decoded with `encoding`.
    fn get_content(&self, path: &str, encoding: &str) -> Result<Resource, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classpath_separator_is_slash() {
        assert_eq!(LoaderKind::Classpath.path_separator(), '/');
    }

    #[test]
    fn test_other_loaders_use_platform_separator() {
        assert_eq!(LoaderKind::File.path_separator(), std::path::MAIN_SEPARATOR);
        assert_eq!(
            LoaderKind::Archive.path_separator(),
            std::path::MAIN_SEPARATOR
        );
    }

    #[test]
    fn test_resource_accessors() {
        let res = Resource::new("dir/page.vm", "hello", LoaderKind::File);
        assert_eq!(res.name(), "dir/page.vm");
        assert_eq!(res.content(), "hello");
        assert_eq!(res.loader(), LoaderKind::File);
    }
}
