//! Static datasets behind the dashboard views.
//!
//! Every function builds its data from scratch, so views never share state.

use vantage_core::dataset::{Dataset, DatasetError, Record, Value};

use crate::{
    VantageError,
    structure::{Graph, GraphError, NodeCategory},
};

pub const FUNDING_CATEGORY: &str = "Funding Category";
pub const FUNDING_PERCENTAGE: &str = "Funding Percentage";

/// Funding sources from long-term to short-term, in percent
const FUNDING_SOURCES: [(&str, f64); 3] = [
    ("Endowment & Investments", 10.0),
    ("Mid-sized Grants & HNWIs", 30.0),
    ("Short-term Grants & Corporate", 60.0),
];

const TIMELINE: [(&str, &str, &str); 4] = [
    ("Grant Acquisition", "2025-03-01", "2025-06-30"),
    ("Corporate Partnerships", "2025-03-15", "2025-07-31"),
    ("In-Kind Expansion", "2025-04-01", "2025-09-01"),
    ("Endowment Structuring", "2025-05-01", "2025-09-30"),
];

/// Efficiency scores out of 100
const PROCESS_METRICS: [(&str, f64); 4] = [
    ("Grant Turnaround", 65.0),
    ("Donor Follow-up", 80.0),
    ("Impact Reporting", 90.0),
    ("Partner Onboarding", 70.0),
];

pub const ECOSYSTEM_CENTER: &str = "HRHP";
const FUNDERS: [&str; 4] = [
    "Government Grants",
    "Private Foundations",
    "Corporate Sponsors",
    "HNWIs",
];
const PARTNERS: [&str; 4] = [
    "MARFund",
    "Research Universities",
    "NGOs",
    "Local Governments",
];

const PROCESS_STEPS: [(&str, NodeCategory); 6] = [
    ("Data Collection", NodeCategory::Step),
    ("Quality Review", NodeCategory::Step),
    ("Data Packaging", NodeCategory::Step),
    ("Corporate Licensing", NodeCategory::Step),
    ("Open Research Release", NodeCategory::Outcome),
    ("Conservation Reinvestment", NodeCategory::Outcome),
];
const PROCESS_LINKS: [(&str, &str); 5] = [
    ("Data Collection", "Quality Review"),
    ("Quality Review", "Data Packaging"),
    ("Data Packaging", "Corporate Licensing"),
    ("Quality Review", "Open Research Release"),
    ("Corporate Licensing", "Conservation Reinvestment"),
];

/// Funding category shares, long-term sources first
pub fn funding_sources() -> Result<Dataset, DatasetError> {
    Dataset::build(FUNDING_SOURCES.iter().map(|(category, share)| {
        Record::new()
            .with(FUNDING_CATEGORY, Value::categorical(*category))
            .with(FUNDING_PERCENTAGE, Value::number(*share))
    }))
}

pub fn implementation_timeline() -> Result<Dataset, VantageError> {
    let records = TIMELINE
        .iter()
        .map(|(task, start, end)| -> Result<Record, chrono::ParseError> {
            Ok(Record::new()
                .with("Task", Value::categorical(*task))
                .with("Start", Value::parse_date(start)?)
                .with("End", Value::parse_date(end)?))
        })
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Dataset::build(records)?)
}

pub fn process_metrics() -> Result<Dataset, DatasetError> {
    Dataset::build(PROCESS_METRICS.iter().map(|(metric, score)| {
        Record::new()
            .with("Metric", Value::categorical(*metric))
            .with("Score", Value::number(*score))
    }))
}

/// Directed chain from collected data to reinvested revenue
pub fn data_monetization() -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    graph.add_node("HRHP Data Assets", NodeCategory::Primary)?;
    graph.add_node("Corporate Users", NodeCategory::Consumer)?;
    graph.add_node("Conservation Reinvestment", NodeCategory::Outcome)?;
    graph.add_edge("HRHP Data Assets", "Corporate Users", true)?;
    graph.add_edge("Corporate Users", "Conservation Reinvestment", true)?;
    Ok(graph)
}

/// HRHP joined to each funder, then to each partner
pub fn partnership_ecosystem() -> Result<Graph, GraphError> {
    let leaves = FUNDERS
        .iter()
        .map(|name| (*name, NodeCategory::Funder))
        .chain(PARTNERS.iter().map(|name| (*name, NodeCategory::Partner)));
    Graph::star(ECOSYSTEM_CENTER, NodeCategory::Primary, leaves)
}

pub fn process_flow() -> Result<Graph, GraphError> {
    let mut graph = Graph::new();
    for (step, category) in PROCESS_STEPS {
        graph.add_node(step, category)?;
    }
    for (from, to) in PROCESS_LINKS {
        graph.add_edge(from, to, true)?;
    }
    Ok(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_datasets_build() {
        assert_eq!(funding_sources().unwrap().len(), 3);
        assert_eq!(implementation_timeline().unwrap().len(), 4);
        assert_eq!(process_metrics().unwrap().len(), 4);
    }

    #[test]
    fn test_static_graphs_build() {
        let ecosystem = partnership_ecosystem().unwrap();
        assert_eq!(ecosystem.nodes_count(), 9);
        assert_eq!(ecosystem.edges_count(), 8);

        let monetization = data_monetization().unwrap();
        assert_eq!(monetization.nodes_count(), 3);
        assert!(monetization.edges().all(|edge| edge.is_directed()));

        let flow = process_flow().unwrap();
        assert_eq!(flow.nodes_count(), 6);
        assert_eq!(flow.edges_count(), 5);
    }
}
