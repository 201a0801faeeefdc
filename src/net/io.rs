//! I/O 支持：PNML 导入，以及 JSON、RON 序列化接口。
use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use ron::ser::PrettyConfig;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IoError {
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),
    #[error("ron parse error: {0}")]
    RonParse(#[from] ron::error::SpannedError),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("xml error: {0}")]
    Xml(#[from] roxmltree::Error),
    #[error("document has no `net` element")]
    MissingNet,
}

pub fn to_json_string<T>(value: &T) -> Result<String, IoError>
where
    T: Serialize,
{
    Ok(serde_json::to_string_pretty(value)?)
}

pub fn from_json_str<T>(s: &str) -> Result<T, IoError>
where
    T: DeserializeOwned,
{
    Ok(serde_json::from_str(s)?)
}

pub fn to_ron_string<T>(value: &T) -> Result<String, IoError>
where
    T: Serialize,
{
    Ok(ron::ser::to_string_pretty(value, PrettyConfig::default())?)
}

pub fn from_ron_str<T>(s: &str) -> Result<T, IoError>
where
    T: DeserializeOwned,
{
    Ok(ron::from_str(s)?)
}

pub fn write_string<P: AsRef<Path>>(path: P, content: &str) -> Result<(), IoError> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

pub fn read_string<P: AsRef<Path>>(path: P) -> Result<String, IoError> {
    let mut file = File::open(path)?;
    let mut content = String::new();
    file.read_to_string(&mut content)?;
    Ok(content)
}

/// PNML 导入。元素只按本地名匹配，因此带或不带命名空间的文档走同一逻辑。
pub mod pnml {
    use std::path::Path;

    use roxmltree::{Document, Node};

    use super::{IoError, read_string};
    use crate::net::core::Net;
    use crate::net::structure::{Arc, Place, Transition, Weight};

    pub fn import_pnml_file<P: AsRef<Path>>(path: P) -> Result<Net, IoError> {
        let content = read_string(path)?;
        import_pnml(&content)
    }

    pub fn import_pnml(content: &str) -> Result<Net, IoError> {
        let document = Document::parse(content)?;
        let net_node = document
            .root_element()
            .descendants()
            .find(|node| is_element(node, "net"))
            .ok_or(IoError::MissingNet)?;

        // 模型名取自首个 page 的名字，page 无名时退回 net 的名字。
        let name = net_node
            .descendants()
            .find(|node| is_element(node, "page"))
            .and_then(|page| named_text(&page))
            .or_else(|| named_text(&net_node))
            .unwrap_or_default();

        let mut net = Net::new(name);

        for node in net_node.descendants().filter(|node| node.is_element()) {
            if in_tool_specific(&node) {
                continue;
            }
            match node.tag_name().name() {
                "place" => {
                    let id = attribute(&node, "id");
                    let name = named_text(&node).unwrap_or_else(|| id.clone());
                    let marking = number(&node, "initialMarking");
                    net.add_place(Place::new(id, name, marking));
                }
                "transition" => {
                    let id = attribute(&node, "id");
                    let name = named_text(&node).unwrap_or_else(|| id.clone());
                    net.add_transition(Transition::new(id, name));
                }
                "arc" => {
                    let inscription = number(&node, "inscription");
                    net.add_arc(Arc::new(
                        attribute(&node, "id"),
                        attribute(&node, "source"),
                        attribute(&node, "target"),
                        inscription,
                    ));
                }
                _ => {}
            }
        }

        log::debug!(
            "loaded net `{}`: {} places, {} transitions, {} arcs",
            net.name,
            net.places_len(),
            net.transitions_len(),
            net.arcs.len()
        );

        Ok(net)
    }

    fn is_element(node: &Node, local_name: &str) -> bool {
        node.is_element() && node.tag_name().name() == local_name
    }

    fn in_tool_specific(node: &Node) -> bool {
        node.ancestors()
            .any(|ancestor| is_element(&ancestor, "toolspecific"))
    }

    fn attribute(node: &Node, name: &str) -> String {
        node.attribute(name).unwrap_or_default().to_string()
    }

    fn child<'a, 'input>(node: &Node<'a, 'input>, local_name: &str) -> Option<Node<'a, 'input>> {
        node.children().find(|child| is_element(child, local_name))
    }

    /// `<label><text>…</text></label>` 的去空白文本，空文本视为缺省。
    fn label_text(node: &Node, label: &str) -> Option<String> {
        let text = child(node, label)
            .and_then(|label| child(&label, "text"))
            .and_then(|text| text.text())?
            .trim();
        if text.is_empty() {
            None
        } else {
            Some(text.to_string())
        }
    }

    fn named_text(node: &Node) -> Option<String> {
        label_text(node, "name")
    }

    fn number(node: &Node, label: &str) -> Option<Weight> {
        let raw = label_text(node, label)?;
        match raw.parse::<Weight>() {
            Ok(value) => Some(value),
            Err(_) => {
                log::warn!(
                    "ignoring non-numeric {} `{}` on `{}`",
                    label,
                    raw,
                    node.attribute("id").unwrap_or_default()
                );
                None
            }
        }
    }

}
