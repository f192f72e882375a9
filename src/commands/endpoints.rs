use serde::Serialize;
use tabled::Tabled;

use crate::actions::Endpoint;
use crate::output;

#[derive(Serialize)]
struct EndpointInfo {
    method: String,
    path: &'static str,
    body: Vec<&'static str>,
    effect: String,
}

#[derive(Tabled)]
struct EndpointRow {
    #[tabled(rename = "Method")]
    method: String,
    #[tabled(rename = "Endpoint")]
    path: &'static str,
    #[tabled(rename = "Body")]
    body: String,
    #[tabled(rename = "On success")]
    effect: String,
}

impl From<&EndpointInfo> for EndpointRow {
    fn from(info: &EndpointInfo) -> Self {
        Self {
            method: info.method.clone(),
            path: info.path,
            body: if info.body.is_empty() {
                "-".to_string()
            } else {
                info.body.join(", ")
            },
            effect: info.effect.clone(),
        }
    }
}

fn describe_effect(endpoint: Endpoint) -> String {
    match endpoint.effect() {
        Some(effect) => effect.to_string(),
        None => format!("navigate to {}?id=<id>", endpoint.path()),
    }
}

fn endpoint_infos() -> Vec<EndpointInfo> {
    Endpoint::ALL
        .iter()
        .map(|&endpoint| EndpointInfo {
            method: endpoint.method().to_string(),
            path: endpoint.path(),
            body: endpoint.body_fields().to_vec(),
            effect: describe_effect(endpoint),
        })
        .collect()
}

pub fn list() {
    output::print_table(&endpoint_infos(), |e| EndpointRow::from(e));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_view_ticket_row_shows_template() {
        let infos = endpoint_infos();
        let view = infos
            .iter()
            .find(|info| info.path == "/view-ticket")
            .unwrap();
        assert_eq!(view.effect, "navigate to /view-ticket?id=<id>");
        assert_eq!(EndpointRow::from(view).body, "-");

        let delete = infos
            .iter()
            .find(|info| info.path == "/delete-ticket")
            .unwrap();
        assert_eq!(delete.effect, "navigate to /");
    }
}
