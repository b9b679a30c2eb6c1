use serde_json::{Value, json};

use crate::error::Result;
use crate::models::{AenObject, NewObject, View};
use crate::params::{QueryParams, path_of};
use crate::transport::{HttpRequest, Transport};

use super::AenClient;

impl<T: Transport> AenClient<T> {
    pub fn get_object(&mut self, object_id: &str, view: Option<View>) -> Result<AenObject> {
        let request = HttpRequest::get(path_of(&["object", object_id])?)
            .query(QueryParams::new().push("view", view.unwrap_or_default()));
        self.execute_typed("object.get", request)
    }

    /// Same as [`Self::get_object`] without decoding into [`AenObject`].
    pub fn get_object_raw(&mut self, object_id: &str, view: Option<View>) -> Result<Value> {
        let request = HttpRequest::get(path_of(&["object", object_id])?)
            .query(QueryParams::new().push("view", view.unwrap_or_default()));
        self.execute_json("object.get", request)
    }

    pub fn create_object(&mut self, object: &NewObject) -> Result<Value> {
        let request = HttpRequest::post("/object")
            .query(
                QueryParams::new()
                    .push("category_id", &object.category_id)
                    .push("parent_id", &object.parent_id)
                    .push("attribute_name", &object.attribute_name),
            )
            .json(Value::Array(object.properties.clone()));
        self.execute_json("object.create", request)
    }

    pub fn update_object(&mut self, object_id: &str, properties: Vec<Value>) -> Result<Value> {
        let request = HttpRequest::put("/object").json(json!({
            "id": object_id,
            "properties": properties,
        }));
        self.execute_json("object.update", request)
    }

    pub fn delete_object(&mut self, object_id: &str) -> Result<()> {
        self.execute_unit(
            "object.delete",
            HttpRequest::delete(path_of(&["object", object_id])?),
        )
    }

    pub fn get_objects<S: AsRef<str>>(
        &mut self,
        object_ids: &[S],
        view: Option<View>,
    ) -> Result<Value> {
        let request = HttpRequest::get("/objects").query(
            QueryParams::new()
                .push_all("object_id", object_ids.iter().map(|id| id.as_ref()))
                .push("view", view.unwrap_or_default()),
        );
        self.execute_json("objects.get", request)
    }

    pub fn create_objects(&mut self, objects: Vec<Value>) -> Result<Value> {
        let request = HttpRequest::post("/objects").json(Value::Array(objects));
        self.execute_json("objects.create", request)
    }

    pub fn update_objects(&mut self, objects: Vec<Value>) -> Result<()> {
        let request = HttpRequest::put("/objects").json(json!({ "objects": objects }));
        self.execute_unit("objects.update", request)
    }

    pub fn delete_objects<S: AsRef<str>>(&mut self, object_ids: &[S]) -> Result<()> {
        let request = HttpRequest::delete("/objects").query(
            QueryParams::new().push_all("object_id", object_ids.iter().map(|id| id.as_ref())),
        );
        self.execute_unit("objects.delete", request)
    }
}
