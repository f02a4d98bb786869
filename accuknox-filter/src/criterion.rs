use accuknox_common::flow::FlowFilter;
use accuknox_common::Verdict;

use crate::FilterError;

/// Side of the flow a criterion applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Source,
    Destination,
}

/// What a criterion matches on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dimension {
    Ip,
    Pod,
    Fqdn,
    Label,
    Port,
    Service,
    /// Not directional, the direction of the criterion is ignored.
    Verdict,
}

/// A single (direction, dimension, value) filter input.
///
/// Values are handed to the relay untouched, except verdict names which are
/// resolved into their enum value when the criterion is built.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Criterion {
    direction: Direction,
    dimension: Dimension,
    value: String,
}

impl Criterion {
    pub fn new(
        direction: Direction,
        dimension: Dimension,
        value: impl Into<String>,
    ) -> Result<Self, FilterError> {
        let value = value.into();
        if dimension == Dimension::Verdict && Verdict::from_str_name(&value).is_none() {
            return Err(FilterError::InvalidVerdict(value));
        }

        Ok(Self {
            direction,
            dimension,
            value,
        })
    }

    /// Builds the single-dimension predicate group sent to the relay.
    pub fn to_flow_filter(&self) -> FlowFilter {
        let mut ff = FlowFilter::default();
        let value = self.value.clone();
        let source = self.direction == Direction::Source;

        match self.dimension {
            Dimension::Ip if source => ff.source_ip.push(value),
            Dimension::Ip => ff.destination_ip.push(value),
            Dimension::Pod if source => ff.source_pod.push(value),
            Dimension::Pod => ff.destination_pod.push(value),
            Dimension::Fqdn if source => ff.source_fqdn.push(value),
            Dimension::Fqdn => ff.destination_fqdn.push(value),
            Dimension::Label if source => ff.source_label.push(value),
            Dimension::Label => ff.destination_label.push(value),
            Dimension::Port if source => ff.source_port.push(value),
            Dimension::Port => ff.destination_port.push(value),
            Dimension::Service if source => ff.source_service.push(value),
            Dimension::Service => ff.destination_service.push(value),
            Dimension::Verdict => {
                // Checked in `Criterion::new`.
                if let Some(verdict) = Verdict::from_str_name(&value) {
                    ff.push_verdict(verdict);
                }
            }
        }

        ff
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn directional_fields() {
        let ff = Criterion::new(Direction::Source, Dimension::Ip, "10.0.0.1")
            .unwrap()
            .to_flow_filter();
        assert_eq!(
            FlowFilter {
                source_ip: vec!["10.0.0.1".to_string()],
                ..Default::default()
            },
            ff
        );

        let ff = Criterion::new(Direction::Destination, Dimension::Label, "app=web")
            .unwrap()
            .to_flow_filter();
        assert_eq!(
            FlowFilter {
                destination_label: vec!["app=web".to_string()],
                ..Default::default()
            },
            ff
        );
    }

    #[test]
    fn verdict_is_resolved() {
        let ff = Criterion::new(Direction::Source, Dimension::Verdict, "DROPPED")
            .unwrap()
            .to_flow_filter();
        assert_eq!(vec![Verdict::Dropped as i32], ff.verdict);
    }

    #[test]
    fn invalid_verdict() {
        assert_eq!(
            Err(FilterError::InvalidVerdict("NOT_A_VERDICT".to_string())),
            Criterion::new(Direction::Source, Dimension::Verdict, "NOT_A_VERDICT")
        );
    }
}
