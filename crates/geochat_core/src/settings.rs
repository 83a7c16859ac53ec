use crate::geo::LngLat;
use crate::markers::Location;

/// User-facing assistant texts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatCopy {
    /// Placeholder shown while a request is in flight.
    pub pending: String,
    /// Prefix of the summary listing the marked locations.
    pub summary_prefix: String,
    /// Joins location names in summaries.
    pub separator: String,
    pub no_locations: String,
    pub failure: String,
    /// Prefix used when a response arrives after a newer one was already shown.
    pub superseded_prefix: String,
}

impl Default for ChatCopy {
    fn default() -> Self {
        Self {
            pending: "正在分析您的需求，请稍候...".to_string(),
            summary_prefix: "已为您在地图上标记了以下地点：".to_string(),
            separator: "、".to_string(),
            no_locations: "抱歉，我没有找到任何有效的地点。请尝试更具体的地点名称。".to_string(),
            failure: "处理您的请求时发生错误，请稍后再试。".to_string(),
            superseded_prefix: "以下地点已被更新的结果取代，未在地图上标记：".to_string(),
        }
    }
}

impl ChatCopy {
    pub fn summary(&self, locations: &[Location]) -> String {
        format!("{}{}", self.summary_prefix, self.join_names(locations))
    }

    pub fn superseded(&self, locations: &[Location]) -> String {
        format!("{}{}", self.superseded_prefix, self.join_names(locations))
    }

    fn join_names(&self, locations: &[Location]) -> String {
        locations
            .iter()
            .map(|location| location.name.as_str())
            .collect::<Vec<_>>()
            .join(&self.separator)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MapControl {
    ToolBar,
    Scale,
}

/// Construction parameters of the map.
#[derive(Debug, Clone, PartialEq)]
pub struct MapSettings {
    pub center: LngLat,
    pub zoom: u8,
    pub controls: Vec<MapControl>,
}

impl Default for MapSettings {
    fn default() -> Self {
        Self {
            center: LngLat::new(116.397428, 39.90923),
            zoom: 4,
            controls: vec![MapControl::ToolBar, MapControl::Scale],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct ChatSettings {
    pub copy: ChatCopy,
    pub map: MapSettings,
}
