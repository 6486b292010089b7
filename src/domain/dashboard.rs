// Dashboard domain model
use super::series::SeriesPayload;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub title: String,
    pub tiles: Vec<TileData>,
    pub charts: Vec<ChartData>,
}

impl Dashboard {
    pub fn new(title: String, tiles: Vec<TileData>, charts: Vec<ChartData>) -> Self {
        Self {
            title,
            tiles,
            charts,
        }
    }
}

/// A metric card: one headline number.
#[derive(Debug, Clone, Serialize)]
pub struct TileData {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub value: f64,
    pub precision: u32,
}

impl TileData {
    pub fn new(id: String, title: String, unit: String, value: f64, precision: u32) -> Self {
        Self {
            id,
            title,
            unit,
            value,
            precision,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Area,
    Bar,
    Line,
    Pie,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChartData {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
    pub series: SeriesPayload,
}

impl ChartData {
    pub fn new(
        id: String,
        title: String,
        unit: Option<String>,
        kind: ChartKind,
        series: SeriesPayload,
    ) -> Self {
        Self {
            id,
            title,
            unit,
            kind,
            series,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TileSkeleton {
    pub id: String,
    pub title: String,
    pub unit: String,
    pub precision: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartSkeleton {
    pub id: String,
    pub title: String,
    pub unit: Option<String>,
    pub kind: ChartKind,
}

/// Messages of a progressively loaded dashboard, in the order a client
/// receives them: one skeleton, any number of updates, one completion.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StreamMessage {
    Skeleton {
        title: String,
        tiles: Vec<TileSkeleton>,
        charts: Vec<ChartSkeleton>,
    },
    TileUpdate {
        id: String,
        value: f64,
    },
    ChartUpdate {
        id: String,
        series: SeriesPayload,
    },
    ChartError {
        id: String,
        error: String,
    },
    Complete {
        widgets: usize,
        duration_ms: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stream_message_is_tagged() {
        let msg = StreamMessage::TileUpdate {
            id: "power".to_string(),
            value: 2456.0,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "tile_update");
        assert_eq!(json["id"], "power");

        let msg = StreamMessage::Complete {
            widgets: 3,
            duration_ms: 812,
        };
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "complete");
        assert_eq!(json["widgets"], 3);
    }
}
