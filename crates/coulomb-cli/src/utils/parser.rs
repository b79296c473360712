use nalgebra::Point2;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Invalid point '{0}'. Expected 'X,Y' (e.g., '120,80').")]
    InvalidPointFormat(String),

    #[error("Invalid {axis} coordinate '{value}': expected a finite number.")]
    InvalidCoordinate { axis: &'static str, value: String },
}

fn parse_coordinate(raw: &str, axis: &'static str) -> Result<f64, ParseError> {
    let trimmed = raw.trim();
    trimmed
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| ParseError::InvalidCoordinate {
            axis,
            value: trimmed.to_string(),
        })
}

/// Parses an `X,Y` pair in canvas units.
pub fn parse_point(s: &str) -> Result<Point2<f64>, ParseError> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| ParseError::InvalidPointFormat(s.to_string()))?;
    if y.contains(',') {
        return Err(ParseError::InvalidPointFormat(s.to_string()));
    }
    Ok(Point2::new(parse_coordinate(x, "x")?, parse_coordinate(y, "y")?))
}
