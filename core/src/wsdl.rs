#![deny(missing_docs)]

//! # WSDL Assembler
//!
//! Builds a WSDL 1.1 `wsdl:definitions` tree for a set of document/literal
//! SOAP operations. Every operation gets its own binding and port; the request
//! and response models of all operations share one aggregated `wsdl:types` schema.

use crate::model::{Model, ModelSet};
use crate::schema_generator::generate_schema;
use crate::xml::XmlNode;
use indexmap::IndexMap;
use std::sync::Arc;
use url::Url;

/// `soap` prefix namespace.
pub const SOAP_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
/// `wsdl` prefix namespace.
pub const WSDL_NS: &str = "http://schemas.xmlsoap.org/wsdl/";
/// `xs` prefix namespace.
pub const XSD_NS: &str = "http://www.w3.org/2001/XMLSchema";
/// `wsdlsoap` prefix namespace.
pub const WSDLSOAP_NS: &str = "http://schemas.xmlsoap.org/wsdl/soap/";
/// SOAP over HTTP transport URI used by every binding.
pub const SOAP_HTTP_TRANSPORT: &str = "http://schemas.xmlsoap.org/soap/http";

/// The fixed `xmlns:*` declarations placed on WSDL and schema roots.
pub fn namespace_declarations() -> [(&'static str, &'static str); 4] {
    [
        ("xmlns:soap", SOAP_NS),
        ("xmlns:wsdl", WSDL_NS),
        ("xmlns:xs", XSD_NS),
        ("xmlns:wsdlsoap", WSDLSOAP_NS),
    ]
}

/// The request/response pair of one operation. Either side may be absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OperationModels {
    /// Input model.
    pub request: Option<Arc<Model>>,
    /// Output model.
    pub response: Option<Arc<Model>>,
}

impl OperationModels {
    /// An operation with both sides.
    pub fn new(request: impl Into<Arc<Model>>, response: impl Into<Arc<Model>>) -> Self {
        Self {
            request: Some(request.into()),
            response: Some(response.into()),
        }
    }

    /// An operation with only a request (no response).
    pub fn request_only(request: impl Into<Arc<Model>>) -> Self {
        Self {
            request: Some(request.into()),
            response: None,
        }
    }

    fn roles(&self) -> [(MessageRole, Option<&Arc<Model>>); 2] {
        [
            (MessageRole::Request, self.request.as_ref()),
            (MessageRole::Response, self.response.as_ref()),
        ]
    }
}

/// Which side of an operation a message carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageRole {
    /// Maps to `wsdl:input`.
    Request,
    /// Maps to `wsdl:output`.
    Response,
}

impl MessageRole {
    /// Title-cased suffix for message names.
    pub fn title(&self) -> &'static str {
        match self {
            MessageRole::Request => "Request",
            MessageRole::Response => "Response",
        }
    }

    /// The portType/binding child tag.
    pub fn direction_tag(&self) -> &'static str {
        match self {
            MessageRole::Request => "wsdl:input",
            MessageRole::Response => "wsdl:output",
        }
    }
}

/// A complete service contract ready to be rendered.
#[derive(Debug, Clone)]
pub struct ServiceDescription {
    /// Service name.
    pub name: String,
    /// Base address for `soap:address` locations.
    pub base_url: Url,
    /// Free-text documentation.
    pub documentation: String,
    /// Operations in declaration order.
    pub operations: IndexMap<String, OperationModels>,
}

impl ServiceDescription {
    /// Creates a description with no operations and no documentation.
    pub fn new(name: impl Into<String>, base_url: Url) -> Self {
        Self {
            name: name.into(),
            base_url,
            documentation: String::new(),
            operations: IndexMap::new(),
        }
    }

    /// Sets the documentation.
    pub fn with_documentation(mut self, documentation: impl Into<String>) -> Self {
        self.documentation = documentation.into();
        self
    }

    /// Adds (or replaces) an operation.
    pub fn with_operation(mut self, name: impl Into<String>, models: OperationModels) -> Self {
        self.operations.insert(name.into(), models);
        self
    }

    /// Distinct models referenced by the operations, in first-use order.
    pub fn models(&self) -> ModelSet {
        self.operations
            .values()
            .flat_map(|ops| ops.roles())
            .filter_map(|(_, model)| model.cloned())
            .collect()
    }

    /// Renders the WSDL tree.
    pub fn to_wsdl(&self) -> XmlNode {
        generate_wsdl(
            &self.name,
            &self.operations,
            &self.base_url,
            &self.documentation,
        )
    }

    /// Same description with a different base address.
    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = base_url;
        self
    }
}

/// Renders the `soap:address` location for an operation:
/// the base URL without query and fragment, trailing slashes removed, then `/operation`.
pub fn operation_location(base_url: &Url, operation: &str) -> String {
    let mut base = base_url.clone();
    base.set_query(None);
    base.set_fragment(None);
    format!("{}/{}", base.as_str().trim_end_matches('/'), operation)
}

/// Builds the `wsdl:definitions` tree.
///
/// Operation ids are `name + operation` with no separator. Absent request or
/// response models drop the matching message and input/output entries.
///
/// # Examples
/// ```
/// use wsdlgen_core::model::Model;
/// use wsdlgen_core::wsdl::{generate_wsdl, OperationModels};
/// use indexmap::IndexMap;
/// use url::Url;
///
/// let mut operations = IndexMap::new();
/// operations.insert(
///     "Add".to_string(),
///     OperationModels::new(Model::new("AddRequest"), Model::new("AddResponse")),
/// );
/// let base = Url::parse("http://host/svc?x=1#frag").unwrap();
///
/// let wsdl = generate_wsdl("Calculator", &operations, &base, "");
/// let port = wsdl.child("wsdl:service").unwrap().child("wsdl:port").unwrap();
/// assert_eq!(port.attr("name"), Some("CalculatorAdd"));
/// assert_eq!(
///     port.child("soap:address").unwrap().attr("location"),
///     Some("http://host/svc/Add")
/// );
/// ```
pub fn generate_wsdl(
    name: &str,
    operations: &IndexMap<String, OperationModels>,
    base_url: &Url,
    documentation: &str,
) -> XmlNode {
    let mut port_type = XmlNode::new("wsdl:portType").with_attr("name", name);
    let mut service = XmlNode::new("wsdl:service").with_attr("name", name);
    // Bindings and messages, appended after portType and service
    let mut trailing = Vec::new();
    let mut types = ModelSet::new();

    for (operation, models) in operations {
        let operation_id = format!("{}{}", name, operation);
        tracing::debug!(service = name, operation = %operation, "Assembling operation");

        let mut port_operation = XmlNode::new("wsdl:operation").with_attr("name", &operation_id);
        let mut binding_operation = XmlNode::new("wsdl:operation")
            .with_attr("name", &operation_id)
            .with_child(XmlNode::new("soap:operation").with_attr("soapAction", operation));

        service.push(
            XmlNode::new("wsdl:port")
                .with_attr("name", &operation_id)
                .with_attr("binding", &operation_id)
                .with_child(
                    XmlNode::new("soap:address")
                        .with_attr("location", operation_location(base_url, operation)),
                ),
        );

        let mut messages = Vec::new();
        for (role, model) in models.roles() {
            let Some(model) = model else {
                continue;
            };
            types.insert(Arc::clone(model));

            let message_name = format!("{}{}", operation, role.title());
            messages.push(
                XmlNode::new("wsdl:message")
                    .with_attr("name", &message_name)
                    .with_child(
                        XmlNode::new("wsdl:part")
                            .with_attr("name", "parameters")
                            .with_attr("element", model.tag_name()),
                    ),
            );

            port_operation.push(
                XmlNode::new(role.direction_tag()).with_attr("message", &message_name),
            );
            binding_operation.push(
                XmlNode::new(role.direction_tag())
                    .with_attr("message", &message_name)
                    .with_child(XmlNode::new("soap:body").with_attr("use", "literal")),
            );
        }

        port_type.push(port_operation);
        trailing.push(
            XmlNode::new("wsdl:binding")
                .with_attr("name", &operation_id)
                .with_attr("type", name)
                .with_child(
                    XmlNode::new("soap:binding")
                        .with_attr("style", "document")
                        .with_attr("transport", SOAP_HTTP_TRANSPORT),
                )
                .with_child(binding_operation),
        );
        trailing.extend(messages);
    }

    tracing::debug!(
        service = name,
        operations = operations.len(),
        models = types.len(),
        "Assembled WSDL"
    );

    let mut documentation_node = XmlNode::new("wsdl:documentation");
    if !documentation.is_empty() {
        documentation_node.text = Some(documentation.to_string());
    }

    let mut definitions = XmlNode::new("wsdl:definitions");
    for (prefix, uri) in namespace_declarations() {
        definitions.set_attr(prefix, uri);
    }
    definitions.set_attr("name", name);

    definitions
        .with_child(documentation_node)
        .with_child(XmlNode::new("wsdl:types").with_child(generate_schema(types.iter())))
        .with_child(port_type)
        .with_child(service)
        .with_children(trailing)
}
