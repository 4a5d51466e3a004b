use crate::error::ParseError;
use crate::types::track::{Gpx, Segment, Track, TrackPoint};
use chrono::{DateTime, Utc};
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;

/// Streaming GPX parser: one pass over the byte stream, accumulating
/// tracks/segments/points. Unknown elements are skipped; a `trkpt`
/// without usable lat/lon attributes is dropped rather than failing the
/// whole file.
pub fn parse(bytes: &[u8]) -> Result<Gpx, ParseError> {
    let mut reader = Reader::from_reader(bytes);
    reader.trim_text(true);

    let mut builder = GpxBuilder::default();
    let mut buf = Vec::new();

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(e)) => builder.start(&e)?,
            Ok(Event::Empty(e)) => {
                // Self-closing elements produce no matching End event.
                builder.start(&e)?;
                let name = e.name();
                let name_str = std::str::from_utf8(name.as_ref())
                    .map_err(|e| ParseError::InvalidXml(e.to_string()))?;
                builder.end(name_str);
            }
            Ok(Event::Text(e)) => builder.text(&e)?,
            Ok(Event::End(e)) => {
                let name = e.name();
                let name_str = std::str::from_utf8(name.as_ref())
                    .map_err(|e| ParseError::InvalidXml(e.to_string()))?;
                builder.end(name_str);
            }
            Ok(Event::Eof) => break,
            Err(e) => return Err(ParseError::InvalidXml(e.to_string())),
            _ => {}
        }
        buf.clear();
    }

    Ok(builder.finish())
}

#[derive(Default)]
struct GpxBuilder {
    tracks: Vec<Track>,
    track: Option<Track>,
    segment: Option<Segment>,
    point: Option<TrackPoint>,
    element: String,
}

impl GpxBuilder {
    fn start(&mut self, e: &BytesStart) -> Result<(), ParseError> {
        let name = e.name();
        let name_str = std::str::from_utf8(name.as_ref())
            .map_err(|e| ParseError::InvalidXml(e.to_string()))?;

        match name_str {
            "trk" => self.track = Some(Track::default()),
            "trkseg" => self.segment = Some(Segment::default()),
            "trkpt" => {
                let mut lat = None;
                let mut lon = None;

                for attr in e.attributes() {
                    let attr = attr.map_err(|e| ParseError::InvalidXml(e.to_string()))?;
                    let key = std::str::from_utf8(attr.key.as_ref())
                        .map_err(|e| ParseError::InvalidXml(e.to_string()))?;
                    let value = std::str::from_utf8(&attr.value)
                        .map_err(|e| ParseError::InvalidXml(e.to_string()))?;

                    match key {
                        "lat" => lat = value.parse().ok(),
                        "lon" => lon = value.parse().ok(),
                        _ => {}
                    }
                }

                if let (Some(lat), Some(lon)) = (lat, lon) {
                    self.point = Some(TrackPoint {
                        lat,
                        lon,
                        elevation: None,
                        time: None,
                    });
                }
            }
            _ => self.element = name_str.to_string(),
        }

        Ok(())
    }

    fn text(&mut self, e: &BytesText) -> Result<(), ParseError> {
        let text = e
            .unescape()
            .map_err(|e| ParseError::InvalidXml(e.to_string()))?;

        if let Some(point) = self.point.as_mut() {
            match self.element.as_str() {
                "ele" => point.elevation = text.parse().ok(),
                "time" => point.time = text.parse::<DateTime<Utc>>().ok(),
                _ => {}
            }
        } else if let Some(track) = self.track.as_mut() {
            // Track-level children only; <name> under <metadata> never
            // lands here because no track is open at that point.
            if self.segment.is_none() {
                match self.element.as_str() {
                    "name" => track.name = Some(text.to_string()),
                    "type" => track.sport = Some(text.to_string()),
                    _ => {}
                }
            }
        }

        Ok(())
    }

    fn end(&mut self, name: &str) {
        match name {
            "trkpt" => {
                if let (Some(point), Some(segment)) = (self.point.take(), self.segment.as_mut()) {
                    segment.points.push(point);
                }
            }
            "trkseg" => {
                if let (Some(segment), Some(track)) = (self.segment.take(), self.track.as_mut()) {
                    track.segments.push(segment);
                }
            }
            "trk" => {
                if let Some(track) = self.track.take() {
                    self.tracks.push(track);
                }
            }
            _ => {}
        }
        self.element.clear();
    }

    fn finish(self) -> Gpx {
        Gpx {
            tracks: self.tracks,
        }
    }
}
