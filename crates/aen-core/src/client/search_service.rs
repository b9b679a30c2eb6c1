use serde_json::Value;

use crate::error::Result;
use crate::models::{QueryResult, SearchRequest, View};
use crate::params::{QueryParams, path_of};
use crate::transport::{HttpRequest, Transport};

use super::AenClient;

impl<T: Transport> AenClient<T> {
    pub fn search(&mut self, search: &SearchRequest) -> Result<Vec<Value>> {
        let request = HttpRequest::get("/search").query(
            QueryParams::new()
                .push("q", &search.q)
                .push("view", search.view.unwrap_or_default())
                .push_all("attribute_name", &search.attribute_names)
                .push_all("category_id", &search.category_ids)
                .push_opt("limit", search.limit),
        );
        self.execute_typed_or_default("search.query", request)
    }

    pub fn search_by_component<S: AsRef<str>>(
        &mut self,
        component_id: &str,
        object_ids: &[S],
        view: Option<View>,
    ) -> Result<Vec<Value>> {
        let request = HttpRequest::get(path_of(&["search", component_id])?).query(
            QueryParams::new()
                .push_all("object_id", object_ids.iter().map(|id| id.as_ref()))
                .push("view", view.unwrap_or_default()),
        );
        self.execute_typed_or_default("search.component", request)
    }

    pub fn get_object_query_result(
        &mut self,
        object_id: &str,
        query_id: &str,
        view: Option<View>,
    ) -> Result<QueryResult> {
        let request = HttpRequest::get(path_of(&["object", object_id, "query", query_id])?)
            .query(QueryParams::new().push("view", view.unwrap_or_default()));
        self.execute_typed_or_default("query.object", request)
    }

    pub fn get_objects_query_result<S: AsRef<str>>(
        &mut self,
        query_id: &str,
        object_ids: &[S],
        view: Option<View>,
    ) -> Result<Value> {
        let request = HttpRequest::get(path_of(&["objects", "query", query_id])?).query(
            QueryParams::new()
                .push_all("object_id", object_ids.iter().map(|id| id.as_ref()))
                .push("view", view.unwrap_or_default()),
        );
        self.execute_json("query.objects", request)
    }
}
