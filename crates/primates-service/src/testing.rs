//! Fixtures for a fake Red List registry

use redlist_api::{Pacer, PacingPolicy, RedListClient};
use serde_json::{json, Value};
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const TOKEN: &str = "test-token";

pub fn client(server: &MockServer) -> Arc<RedListClient> {
    Arc::new(
        RedListClient::new(&server.uri(), TOKEN)
            .unwrap()
            .with_pacer(Pacer::new(PacingPolicy::Unthrottled)),
    )
}

pub fn encoded(name: &str) -> String {
    name.replace(' ', "%20")
}

async fn mount_json(server: &MockServer, route: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(route))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

pub fn listed(name: &str, order: &str) -> Value {
    json!({"taxonid": 1, "scientific_name": name, "order_name": order})
}

/// Mount `/speciescount` and one `/species/page/{i}` per entry of `pages`
pub async fn mount_listing(server: &MockServer, count: Value, pages: Vec<Vec<Value>>) {
    mount_json(server, "/speciescount", json!({ "count": count })).await;
    for (i, entries) in pages.into_iter().enumerate() {
        mount_json(
            server,
            &format!("/species/page/{}", i),
            json!({"count": entries.len(), "page": i.to_string(), "result": entries}),
        )
        .await;
    }
}

/// Mount every per-species endpoint for `name`, with `published_year` as given
pub async fn mount_species(server: &MockServer, name: &str, published_year: Value) {
    let n = encoded(name);
    mount_json(
        server,
        &format!("/species/{}", n),
        json!({"name": name, "result": [{
            "taxonid": 9404,
            "scientific_name": name,
            "kingdom": "ANIMALIA",
            "order": "PRIMATES",
            "family": "HOMINIDAE",
            "genus": "Gorilla",
            "main_common_name": "Western Gorilla",
            "published_year": published_year,
            "assessment_date": "2016-02-26",
            "category": "CR",
            "criteria": "A4bcd",
            "population_trend": "Decreasing",
            "marine_system": false,
            "freshwater_system": false,
            "terrestrial_system": true
        }]}),
    )
    .await;
    mount_json(
        server,
        &format!("/species/citation/{}", n),
        json!({"name": name, "result": [{"citation": "Maisels, F. et al. 2018."}]}),
    )
    .await;
    mount_json(
        server,
        &format!("/threats/species/name/{}", n),
        json!({"name": name, "result": [
            {"code": "5.1.1", "title": "Intentional use", "timing": "Ongoing", "score": "High Impact: 8"},
            {"code": "2.1.3", "title": "Agro-industry farming", "timing": "Ongoing", "score": "Low Impact: 5"}
        ]}),
    )
    .await;
    mount_json(
        server,
        &format!("/measures/species/name/{}", n),
        json!({"name": name, "result": [{"code": "1.1", "title": "Site/area protection"}]}),
    )
    .await;
    mount_json(
        server,
        &format!("/species/history/name/{}", n),
        json!({"name": name, "result": [
            {"year": "2016", "code": "CR", "category": "Critically Endangered"},
            {"year": "2008", "code": "CR", "category": "Critically Endangered"},
            {"year": "2000", "code": "EN", "category": "Endangered"}
        ]}),
    )
    .await;
    mount_json(
        server,
        &format!("/species/countries/name/{}", n),
        json!({"name": name, "result": [
            {"code": "CM", "country": "Cameroon", "presence": "Extant", "origin": "Native"}
        ]}),
    )
    .await;
    mount_json(
        server,
        &format!("/habitats/species/name/{}", n),
        json!({"name": name, "result": [{"code": "1.6", "habitat": "Forest - Subtropical/Tropical Moist Lowland"}]}),
    )
    .await;
    mount_json(
        server,
        &format!("/species/narrative/{}", n),
        json!({"name": name, "result": [{
            "taxonomicnotes": null,
            "rationale": "Declining due to hunting and disease.",
            "geographicrange": "Western equatorial Africa.",
            "population": "Estimated 360,000.",
            "habitat": "Lowland forest.",
            "threats": "Poaching, Ebola.",
            "conservationmeasures": "Protected areas.",
            "usetrade": "Bushmeat."
        }]}),
    )
    .await;
}

/// Number of requests the fake registry has received so far
pub async fn request_count(server: &MockServer) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.len())
        .unwrap_or(0)
}

/// Number of requests the fake registry has received for `route`
pub async fn requests_to(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .map(|requests| requests.iter().filter(|r| r.url.path() == route).count())
        .unwrap_or(0)
}
