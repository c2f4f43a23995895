use serde::{Deserialize, Serialize};

/// Attributes of one van model link as found on the page
/// (`data-model-id`, `data-model-name`, `data-display-name`, the image's `src`,
/// and whether it carries the `active` class).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelLink {
    pub model_id: Option<String>,
    pub model_name: Option<String>,
    pub display_name: Option<String>,
    pub image_src: Option<String>,
    #[serde(default)]
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VanModel {
    pub id: String,
    pub name: String,
    pub display_name: String,
    pub image: Option<String>,
}

/// Anything that can list the page's model links. The page may render them late,
/// so callers re-read on demand.
pub trait ModelLinkSource {
    fn model_links(&self) -> Vec<ModelLink>;

    /// Drops the `active` state from every model link on the page.
    fn deactivate_all(&mut self);
}

impl ModelLinkSource for Vec<ModelLink> {
    fn model_links(&self) -> Vec<ModelLink> {
        self.clone()
    }

    fn deactivate_all(&mut self) {
        for link in self.iter_mut() {
            link.active = false;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VanCatalog {
    models: Vec<VanModel>,
}

impl VanCatalog {
    /// Builds the catalog, skipping links without an id or name.
    /// An empty display name falls back to the model name.
    pub fn from_links(links: &[ModelLink]) -> Self {
        let models = links
            .iter()
            .filter_map(|link| {
                let id = non_empty(link.model_id.as_deref())?;
                let name = non_empty(link.model_name.as_deref())?;
                let display_name = non_empty(link.display_name.as_deref()).unwrap_or(name);
                Some(VanModel {
                    id: id.to_owned(),
                    name: name.to_owned(),
                    display_name: display_name.to_owned(),
                    image: link.image_src.clone(),
                })
            })
            .collect();
        Self { models }
    }

    pub fn load(source: &impl ModelLinkSource) -> Self {
        Self::from_links(&source.model_links())
    }

    pub fn find(&self, id: &str) -> Option<&VanModel> {
        self.models.iter().find(|m| m.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn link(id: Option<&str>, name: Option<&str>, display: Option<&str>) -> ModelLink {
        ModelLink {
            model_id: id.map(str::to_owned),
            model_name: name.map(str::to_owned),
            display_name: display.map(str::to_owned),
            image_src: None,
            active: false,
        }
    }

    #[test]
    fn test_links_without_id_or_name_are_skipped() {
        let catalog = VanCatalog::from_links(&[
            link(Some("sprinter"), Some("Sprinter"), None),
            link(None, Some("Transit"), None),
            link(Some("ducato"), None, None),
            link(Some(""), Some("Empty"), None),
        ]);
        assert_eq!(catalog.len(), 1);
        assert!(catalog.find("sprinter").is_some());
        assert!(catalog.find("ducato").is_none());
    }

    #[test]
    fn test_display_name_falls_back_to_name() {
        let catalog = VanCatalog::from_links(&[
            link(Some("a"), Some("Sprinter 144"), Some("")),
            link(Some("b"), Some("Transit"), Some("Ford Transit")),
        ]);
        assert_eq!(catalog.find("a").unwrap().display_name, "Sprinter 144");
        assert_eq!(catalog.find("b").unwrap().display_name, "Ford Transit");
    }

    #[test]
    fn test_load_reads_from_source() {
        let source = vec![link(Some("promaster"), Some("ProMaster"), None)];
        let catalog = VanCatalog::load(&source);
        assert_eq!(catalog.find("promaster").unwrap().name, "ProMaster");
    }

    #[test]
    fn test_deactivate_all_clears_every_link() {
        let mut links = vec![
            ModelLink {
                active: true,
                ..link(Some("sprinter"), Some("Sprinter"), None)
            },
            link(Some("transit"), Some("Transit"), None),
            ModelLink {
                active: true,
                ..link(None, None, None)
            },
        ];
        links.deactivate_all();
        assert!(links.iter().all(|l| !l.active));
    }
}
