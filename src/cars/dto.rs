use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A numeric field that clients may send either as a JSON number or as a
/// numeric string ("45.5").
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum NumberOrText {
    Number(serde_json::Number),
    Text(String),
}

impl NumberOrText {
    pub fn to_f64(&self) -> Option<f64> {
        let v = match self {
            NumberOrText::Number(n) => n.as_f64()?,
            NumberOrText::Text(s) => s.trim().parse::<f64>().ok()?,
        };
        v.is_finite().then_some(v)
    }

    pub fn to_i32(&self) -> Option<i32> {
        match self {
            NumberOrText::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            NumberOrText::Text(s) => s.trim().parse::<i32>().ok(),
        }
    }

    fn is_blank(&self) -> bool {
        matches!(self, NumberOrText::Text(s) if s.is_empty())
    }
}

/// Request body for `POST /cars`. Every field is required; absence is
/// checked after decoding so the client gets a uniform message.
#[derive(Debug, Deserialize)]
pub struct CreateCarRequest {
    pub name: Option<String>,
    pub price_per_day: Option<NumberOrText>,
    pub year: Option<NumberOrText>,
    pub color: Option<String>,
    pub steering_type: Option<String>,
    pub number_of_seats: Option<NumberOrText>,
}

impl CreateCarRequest {
    pub(crate) fn has_all_fields(&self) -> bool {
        let text = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        let num = |v: &Option<NumberOrText>| v.as_ref().is_some_and(|n| !n.is_blank());
        text(&self.name)
            && num(&self.price_per_day)
            && num(&self.year)
            && text(&self.color)
            && text(&self.steering_type)
            && num(&self.number_of_seats)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedCarResponse {
    pub message: String,
    pub car_id: Uuid,
}
