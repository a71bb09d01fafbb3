use crate::domain::card::Card;
use crate::utils::error::{Result, WorkbenchError};

/// CSV with a `rank,suit` header, one card per row.
pub fn cards_to_csv(cards: &[Card]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for card in cards {
        writer.serialize(card)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| WorkbenchError::IoError(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

pub fn cards_to_json(cards: &[Card]) -> Result<String> {
    Ok(serde_json::to_string_pretty(cards)?)
}

pub fn cards_from_csv(data: &str) -> Result<Vec<Card>> {
    let mut reader = csv::Reader::from_reader(data.as_bytes());
    let cards = reader.deserialize().collect::<std::result::Result<Vec<Card>, _>>()?;
    Ok(cards)
}
