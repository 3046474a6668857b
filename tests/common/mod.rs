//! Shared fixtures: an in-memory business object model, a scripted
//! rendering engine and a scripted print session.

use docket::{
    ArchetypeDescriptor, BusinessObject, CompiledReport, Converter, ConverterRegistry,
    DataSource, DocumentId, EngineError, EngineSession, FieldValue, InMemoryArchetypeService,
    InMemoryDocumentStore, NodeDescriptor, ObjectRef, ObjectReport, ParameterType, PoolConfig,
    PoolError, PrintAttribute, PrintError, PrintSession, RenderEngine, RenderedPrintSession,
    ResolvedParameters, SessionFactory, SessionPool, SharedObject, TemplateSet, Value, ValueType,
    formats,
};
use docket::Document;
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

// ---------------------------------------------------------------------
// Business objects
// ---------------------------------------------------------------------

#[derive(Debug)]
pub struct TestObject {
    pub archetype: String,
    pub name: String,
    pub fields: HashMap<String, FieldValue>,
}

impl TestObject {
    pub fn new(archetype: &str, name: &str) -> Self {
        Self {
            archetype: archetype.to_string(),
            name: name.to_string(),
            fields: HashMap::new(),
        }
    }

    pub fn with_field(mut self, name: &str, value: FieldValue) -> Self {
        self.fields.insert(name.to_string(), value);
        self
    }

    pub fn shared(self) -> SharedObject {
        Arc::new(self)
    }
}

impl BusinessObject for TestObject {
    fn archetype(&self) -> &str {
        &self.archetype
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.fields.get(name).cloned()
    }
}

/// An invoice archetype with a text name, a money total, a customer
/// reference and a line-item collection.
pub fn archetypes() -> Arc<InMemoryArchetypeService> {
    let service = InMemoryArchetypeService::new();
    service.register(ArchetypeDescriptor::new(
        "act.customerInvoice",
        vec![
            NodeDescriptor::scalar("name", ValueType::Text),
            NodeDescriptor::money("total"),
            NodeDescriptor::reference("customer", "party.customer"),
            NodeDescriptor::collection("items", "act.invoiceItem"),
        ],
    ));
    service.register(ArchetypeDescriptor::new(
        "act.invoiceItem",
        vec![NodeDescriptor::scalar("name", ValueType::Text)],
    ));
    Arc::new(service)
}

pub fn invoice() -> SharedObject {
    let consultation = TestObject::new("act.invoiceItem", "Consultation").shared();
    let vaccination = TestObject::new("act.invoiceItem", "Vaccination").shared();
    TestObject::new("act.customerInvoice", "INV-1")
        .with_field("name", FieldValue::Scalar(Value::Text("INV-1".into())))
        .with_field("total", FieldValue::Scalar(Value::Int(120)))
        .with_field(
            "customer",
            FieldValue::Reference(ObjectRef {
                archetype: "party.customer".into(),
                id: 17,
                name: "Acme Pty Ltd".into(),
            }),
        )
        .with_field(
            "items",
            FieldValue::Collection(vec![consultation, vaccination]),
        )
        .shared()
}

// ---------------------------------------------------------------------
// Rendering engine
// ---------------------------------------------------------------------

pub struct StubTemplate {
    pub name: String,
    pub parameters: Vec<ParameterType>,
}

impl CompiledReport for StubTemplate {
    fn name(&self) -> &str {
        &self.name
    }

    fn parameter_types(&self) -> &[ParameterType] {
        &self.parameters
    }
}

/// Every row the engine read during fill, as name/value pairs.
pub struct Rendered {
    pub rows: Vec<Vec<(String, Value)>>,
}

#[derive(Default)]
pub struct StubEngine {
    pub fills: AtomicUsize,
}

impl RenderEngine for StubEngine {
    type Template = StubTemplate;
    type Artifact = Rendered;

    fn compile(&self, source: &[u8]) -> Result<StubTemplate, EngineError> {
        let name = std::str::from_utf8(source)
            .map_err(|err| EngineError::MalformedTemplate(err.to_string()))?;
        Ok(StubTemplate {
            name: name.to_string(),
            parameters: vec![],
        })
    }

    fn fill(
        &self,
        _templates: &TemplateSet<StubTemplate>,
        _parameters: &ResolvedParameters,
        source: &mut dyn DataSource,
    ) -> Result<Rendered, EngineError> {
        self.fills.fetch_add(1, Ordering::SeqCst);
        let fields: Vec<String> = source.field_names().to_vec();
        let mut rows = Vec::new();
        while source.advance()? {
            let mut row = Vec::new();
            for field in &fields {
                row.push((field.clone(), source.value(field)?));
            }
            rows.push(row);
        }
        Ok(Rendered { rows })
    }
}

pub struct MagicConverter {
    pub mime: &'static str,
    pub ext: &'static str,
    pub magic: &'static [u8],
}

impl Converter<Rendered> for MagicConverter {
    fn mime_type(&self) -> &'static str {
        self.mime
    }

    fn extension(&self) -> &'static str {
        self.ext
    }

    fn convert(&self, artifact: &Rendered) -> Result<Vec<u8>, EngineError> {
        let mut data = self.magic.to_vec();
        data.extend_from_slice(format!("{} rows", artifact.rows.len()).as_bytes());
        Ok(data)
    }
}

/// A registry with both whitelisted converters installed.
pub fn converters() -> Arc<ConverterRegistry<Rendered>> {
    let mut registry = ConverterRegistry::new();
    registry.register(Box::new(MagicConverter {
        mime: formats::PDF_TYPE,
        ext: formats::PDF_EXT,
        magic: b"%PDF-",
    }));
    registry.register(Box::new(MagicConverter {
        mime: formats::RTF_TYPE,
        ext: formats::RTF_EXT,
        magic: b"{\\rtf1",
    }));
    Arc::new(registry)
}

/// An invoice report over the stub engine with an in-memory document
/// store.
pub fn invoice_report() -> (Arc<StubEngine>, ObjectReport<StubEngine>) {
    let engine = Arc::new(StubEngine::default());
    let templates = TemplateSet::new(engine.compile(b"invoice").unwrap());
    let report = ObjectReport::new(
        engine.clone(),
        templates,
        archetypes(),
        Arc::new(InMemoryDocumentStore::new()),
        converters(),
    );
    (engine, report)
}

// ---------------------------------------------------------------------
// Print sessions
// ---------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum PrintCall {
    Open(String),
    OpenRendered,
    SetPrinter(String),
    Print(Vec<PrintAttribute>),
    CloseDocument,
    CloseSession,
}

#[derive(Default)]
pub struct PrintScript {
    pub calls: Mutex<Vec<PrintCall>>,
    pub connects: AtomicUsize,
    pub fail_print: AtomicBool,
}

impl PrintScript {
    pub fn calls(&self) -> Vec<PrintCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: PrintCall) {
        self.calls.lock().unwrap().push(call);
    }
}

pub struct ScriptedSession {
    script: Arc<PrintScript>,
}

impl EngineSession for ScriptedSession {
    fn ping(&mut self) -> bool {
        true
    }

    fn close(&mut self) {
        self.script.record(PrintCall::CloseSession);
    }
}

impl PrintSession for ScriptedSession {
    fn open_document(&mut self, document: &Document) -> Result<DocumentId, PrintError> {
        self.script
            .record(PrintCall::Open(document.name().to_string()));
        Ok(DocumentId(1))
    }

    fn set_printer(&mut self, _document: DocumentId, printer: &str) -> Result<(), PrintError> {
        self.script.record(PrintCall::SetPrinter(printer.to_string()));
        Ok(())
    }

    fn print(
        &mut self,
        _document: DocumentId,
        attributes: &[PrintAttribute],
    ) -> Result<(), PrintError> {
        if self.script.fail_print.load(Ordering::SeqCst) {
            return Err(PrintError::Failed {
                name: "invoice".into(),
                message: "engine rejected attribute".into(),
            });
        }
        self.script.record(PrintCall::Print(attributes.to_vec()));
        Ok(())
    }

    fn close_document(&mut self, _document: DocumentId) -> Result<(), PrintError> {
        self.script.record(PrintCall::CloseDocument);
        Ok(())
    }
}

impl RenderedPrintSession<Rendered> for ScriptedSession {
    fn open_rendered(&mut self, _artifact: &Rendered) -> Result<DocumentId, PrintError> {
        self.script.record(PrintCall::OpenRendered);
        Ok(DocumentId(2))
    }
}

pub struct ScriptedFactory {
    pub script: Arc<PrintScript>,
}

impl SessionFactory for ScriptedFactory {
    type Session = ScriptedSession;

    fn connect(&self) -> Result<ScriptedSession, PoolError> {
        self.script.connects.fetch_add(1, Ordering::SeqCst);
        Ok(ScriptedSession {
            script: self.script.clone(),
        })
    }
}

/// A capacity-1 pool over scripted sessions, with its script handle.
pub fn print_fixture() -> (Arc<PrintScript>, Arc<SessionPool<ScriptedFactory>>) {
    let script = Arc::new(PrintScript::default());
    let pool = Arc::new(SessionPool::new(
        ScriptedFactory {
            script: script.clone(),
        },
        PoolConfig::new(1, Duration::from_millis(200)),
    ));
    (script, pool)
}
