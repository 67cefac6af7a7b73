use pretty_assertions::assert_eq;
use std::sync::Arc;
use url::Url;
use wsdlgen_core::{
    extract_models, generate_element, parse_xml, to_xml_string, to_xml_string_pretty,
    FieldDescriptor, Model, OperationModels, ServiceDescription, TypeShape,
};

const NAMESPACES: &str = concat!(
    r#"xmlns:soap="http://schemas.xmlsoap.org/wsdl/soap/" "#,
    r#"xmlns:wsdl="http://schemas.xmlsoap.org/wsdl/" "#,
    r#"xmlns:xs="http://www.w3.org/2001/XMLSchema" "#,
    r#"xmlns:wsdlsoap="http://schemas.xmlsoap.org/wsdl/soap/""#
);

fn calculator() -> ServiceDescription {
    let request = Model::new("AddRequest")
        .with_field(FieldDescriptor::new("a", TypeShape::scalar("int")))
        .with_field(FieldDescriptor::new("b", TypeShape::scalar("int")));
    let response =
        Model::new("AddResponse").with_field(FieldDescriptor::new("sum", TypeShape::scalar("int")));

    ServiceDescription::new(
        "Calculator",
        Url::parse("http://host/svc?x=1#frag").unwrap(),
    )
    .with_operation("Add", OperationModels::new(request, response))
}

#[test]
fn test_calculator_document_text() {
    let xml = to_xml_string(&calculator().to_wsdl()).unwrap();

    let expected = [
        format!(r#"<wsdl:definitions {} name="Calculator">"#, NAMESPACES),
        "<wsdl:documentation/>".to_string(),
        format!("<wsdl:types><xs:schema {}>", NAMESPACES),
        concat!(
            r#"<xs:element name="AddRequest"><xs:complexType><xs:sequence>"#,
            r#"<xs:element name="a" type="xs:integer"/>"#,
            r#"<xs:element name="b" type="xs:integer"/>"#,
            r#"</xs:sequence></xs:complexType></xs:element>"#,
            r#"<xs:element name="AddResponse"><xs:complexType><xs:sequence>"#,
            r#"<xs:element name="sum" type="xs:integer"/>"#,
            r#"</xs:sequence></xs:complexType></xs:element>"#,
            r#"</xs:schema></wsdl:types>"#,
            r#"<wsdl:portType name="Calculator"><wsdl:operation name="CalculatorAdd">"#,
            r#"<wsdl:input message="AddRequest"/><wsdl:output message="AddResponse"/>"#,
            r#"</wsdl:operation></wsdl:portType>"#,
            r#"<wsdl:service name="Calculator">"#,
            r#"<wsdl:port name="CalculatorAdd" binding="CalculatorAdd">"#,
            r#"<soap:address location="http://host/svc/Add"/>"#,
            r#"</wsdl:port></wsdl:service>"#,
            r#"<wsdl:binding name="CalculatorAdd" type="Calculator">"#,
            r#"<soap:binding style="document" transport="http://schemas.xmlsoap.org/soap/http"/>"#,
            r#"<wsdl:operation name="CalculatorAdd"><soap:operation soapAction="Add"/>"#,
            r#"<wsdl:input message="AddRequest"><soap:body use="literal"/></wsdl:input>"#,
            r#"<wsdl:output message="AddResponse"><soap:body use="literal"/></wsdl:output>"#,
            r#"</wsdl:operation></wsdl:binding>"#,
            r#"<wsdl:message name="AddRequest">"#,
            r#"<wsdl:part name="parameters" element="AddRequest"/></wsdl:message>"#,
            r#"<wsdl:message name="AddResponse">"#,
            r#"<wsdl:part name="parameters" element="AddResponse"/></wsdl:message>"#,
            r#"</wsdl:definitions>"#
        )
        .to_string(),
    ]
    .concat();

    assert_eq!(xml, expected);
}

#[test]
fn test_round_trip_is_lossless() {
    let tree = calculator()
        .with_documentation("Adds <two> numbers & more")
        .to_wsdl();

    let reparsed = parse_xml(&to_xml_string(&tree).unwrap()).unwrap();
    assert_eq!(reparsed, tree);

    let reparsed_pretty = parse_xml(&to_xml_string_pretty(&tree, 2).unwrap()).unwrap();
    assert_eq!(reparsed_pretty, tree);
}

#[test]
fn test_whitespace_documentation_round_trips() {
    let tree = calculator().with_documentation("   ").to_wsdl();
    assert_eq!(
        tree.child("wsdl:documentation").and_then(|d| d.text.as_deref()),
        Some("   ")
    );

    let reparsed = parse_xml(&to_xml_string(&tree).unwrap()).unwrap();
    assert_eq!(reparsed, tree);

    let reparsed_pretty = parse_xml(&to_xml_string_pretty(&tree, 2).unwrap()).unwrap();
    assert_eq!(reparsed_pretty, tree);
}

#[test]
fn test_message_names_derived_from_operation_not_model() {
    let service = ServiceDescription::new("Bank", Url::parse("http://bank/api/").unwrap())
        .with_operation(
            "Transfer",
            OperationModels::new(
                Model::new("TransferIn").with_tag("transfer"),
                Model::new("TransferOut").with_tag("receipt"),
            ),
        );
    let wsdl = service.to_wsdl();

    let request = wsdl.child_by_name("wsdl:message", "TransferRequest").unwrap();
    assert_eq!(
        request.child("wsdl:part").unwrap().attr("element"),
        Some("transfer")
    );
    let response = wsdl.child_by_name("wsdl:message", "TransferResponse").unwrap();
    assert_eq!(
        response.child("wsdl:part").unwrap().attr("element"),
        Some("receipt")
    );

    let port = wsdl.child("wsdl:service").unwrap().child("wsdl:port").unwrap();
    assert_eq!(
        port.child("soap:address").unwrap().attr("location"),
        Some("http://bank/api/Transfer")
    );
}

#[test]
fn test_operations_keep_caller_order_and_share_models() {
    let status = Arc::new(Model::new("Status"));
    let service = ServiceDescription::new("Machine", Url::parse("http://m/").unwrap())
        .with_operation(
            "Stop",
            OperationModels {
                request: None,
                response: Some(status.clone()),
            },
        )
        .with_operation(
            "Start",
            OperationModels {
                request: Some(Arc::new(Model::new("StartRequest"))),
                response: Some(status),
            },
        );
    let wsdl = service.to_wsdl();

    let ops: Vec<&str> = wsdl
        .child("wsdl:portType")
        .unwrap()
        .children
        .iter()
        .filter_map(|c| c.attr("name"))
        .collect();
    assert_eq!(ops, vec!["MachineStop", "MachineStart"]);

    let schema = wsdl.child("wsdl:types").unwrap().child("xs:schema").unwrap();
    let names: Vec<&str> = schema.children.iter().filter_map(|c| c.attr("name")).collect();
    assert_eq!(names, vec!["Status", "StartRequest"]);
}

#[test]
fn test_parsed_models_to_schema() {
    let code = r#"
        #[xml(tag = "item")]
        struct Item {
            sku: String,
            quantity: std::num::NonZeroU32,
        }

        #[xml(tag = "order")]
        struct Order {
            #[serde(rename = "orderId")]
            id: u64,
            placed: chrono::NaiveDateTime,
            #[xml(element, tag = "Item")]
            items: Vec<Item>,
            note: Option<String>,
            website: Option<url::Url>,
        }
    "#;
    let registry = extract_models(code).unwrap();
    let order = registry.require("Order").unwrap();

    let xml = to_xml_string(&generate_element(Some(&order), None)).unwrap();
    let expected = concat!(
        r#"<xs:element name="order"><xs:complexType><xs:sequence>"#,
        r#"<xs:element name="orderId" type="xs:integer"/>"#,
        r#"<xs:element name="placed" type="xs:dateTime"/>"#,
        r#"<xs:element name="Item" minOccurs="0" maxOccurs="unbounded"><xs:complexType><xs:sequence>"#,
        r#"<xs:element name="sku" type="xs:string"/>"#,
        r#"<xs:element name="quantity" type="xs:positiveInteger"/>"#,
        r#"</xs:sequence></xs:complexType></xs:element>"#,
        r#"<xs:element name="note" type="xs:string" minOccurs="0"/>"#,
        r#"<xs:element name="website" type="xs:anyURI" minOccurs="0"/>"#,
        r#"</xs:sequence></xs:complexType></xs:element>"#
    );
    assert_eq!(xml, expected);
}
