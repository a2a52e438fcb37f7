use ferrous_ioc::{
    cast_dependency, ApplicationContext, Bean, BeanFactoryExt, BeanNameAware, BeanPostProcessor,
    BeanRef, ComponentDescriptor, ComponentScan, DiError, DiResult, DisposableBean,
    InitializingBean, StaticTypeSource,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, OnceLock};

// One event log per test, keyed by package, since fn-pointer constructors
// cannot capture state.
fn log_for(package: &str) -> Arc<Mutex<Vec<String>>> {
    static LOGS: OnceLock<Mutex<Vec<(String, Arc<Mutex<Vec<String>>>)>>> = OnceLock::new();
    let mut logs = LOGS.get_or_init(Default::default).lock().unwrap();
    if let Some((_, log)) = logs.iter().find(|(p, _)| p == package) {
        return log.clone();
    }
    let log = Arc::new(Mutex::new(Vec::new()));
    logs.push((package.to_string(), log.clone()));
    log
}

#[derive(Default)]
struct Dependency;
impl Bean for Dependency {}

struct Tracked {
    package: &'static str,
    dependency: Option<Arc<Dependency>>,
    bean_name: String,
    initialized: bool,
}

impl Tracked {
    fn record(&self, event: impl Into<String>) {
        log_for(self.package).lock().unwrap().push(event.into());
    }
}

impl Bean for Tracked {
    fn inject(&mut self, field: &str, dependency: BeanRef) -> DiResult<()> {
        match field {
            "dependency" => {
                self.record("inject:dependency");
                self.dependency = Some(cast_dependency(field, dependency)?);
                Ok(())
            }
            _ => Err(self.unknown_field(field)),
        }
    }

    fn as_bean_name_aware(&mut self) -> Option<&mut dyn BeanNameAware> {
        Some(self)
    }

    fn as_initializing_bean(&mut self) -> Option<&mut dyn InitializingBean> {
        Some(self)
    }

    fn as_disposable_bean(&self) -> Option<&dyn DisposableBean> {
        Some(self)
    }
}

impl BeanNameAware for Tracked {
    fn set_bean_name(&mut self, name: &str) {
        self.record(format!("aware:{}", name));
        self.bean_name = name.to_string();
    }
}

impl InitializingBean for Tracked {
    fn after_properties_set(&mut self) {
        assert!(self.dependency.is_some(), "fields are set before init");
        self.record(format!("init:{}", self.bean_name));
        self.initialized = true;
    }
}

impl DisposableBean for Tracked {
    fn destroy(&self) {
        self.record(format!("destroy:{}", self.bean_name));
    }
}

fn tracked_in(package: &'static str) -> Tracked {
    Tracked {
        package,
        dependency: None,
        bean_name: String::new(),
        initialized: false,
    }
}

struct HookRecorder {
    log: Arc<Mutex<Vec<String>>>,
}

impl BeanPostProcessor for HookRecorder {
    fn post_process_after_initialization(&self, bean_name: &str, bean: &mut dyn Bean) {
        if let Some(tracked) = bean.downcast_ref::<Tracked>() {
            assert!(tracked.initialized);
        }
        self.log.lock().unwrap().push(format!("hook:{}", bean_name));
    }
}

#[test]
fn test_callback_order() {
    const PACKAGE: &str = "app.lifecycle.order";
    let log = log_for(PACKAGE);

    let mut source = StaticTypeSource::new();
    source
        .add(ComponentDescriptor::<Dependency>::new().in_package(PACKAGE).component("dependency"))
        .add(
            ComponentDescriptor::<Tracked>::with_constructor(|| Ok(tracked_in("app.lifecycle.order")))
                .in_package(PACKAGE)
                .component("tracked")
                .autowired("dependency"),
        );

    let context = ApplicationContext::builder(ComponentScan::new(PACKAGE), &source)
        .post_processor(Arc::new(HookRecorder { log: log.clone() }))
        .build()
        .unwrap();

    let events: Vec<String> = log
        .lock()
        .unwrap()
        .iter()
        .filter(|e| !e.starts_with("hook:dependency"))
        .cloned()
        .collect();
    assert_eq!(
        events,
        vec![
            "inject:dependency",
            "aware:tracked",
            "init:tracked",
            "hook:tracked",
        ]
    );

    let tracked = context.get_bean_as::<Tracked>("tracked").unwrap();
    assert_eq!(tracked.bean_name, "tracked");
    assert!(tracked.initialized);
    context.close();
}

#[test]
fn test_prototype_runs_callbacks_per_instance() {
    const PACKAGE: &str = "app.lifecycle.prototype";
    let log = log_for(PACKAGE);

    let mut source = StaticTypeSource::new();
    source
        .add(ComponentDescriptor::<Dependency>::new().in_package(PACKAGE).component("dependency"))
        .add(
            ComponentDescriptor::<Tracked>::with_constructor(|| Ok(tracked_in("app.lifecycle.prototype")))
                .in_package(PACKAGE)
                .component("tracked")
                .scope("prototype")
                .autowired("dependency"),
        );

    let context = ApplicationContext::new(ComponentScan::new(PACKAGE), &source).unwrap();
    assert!(log.lock().unwrap().is_empty());

    context.get_bean_as::<Tracked>("tracked").unwrap();
    context.get_bean_as::<Tracked>("tracked").unwrap();

    let inits = log
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.starts_with("init:"))
        .count();
    assert_eq!(inits, 2);

    // Prototypes are never destroyed by the container
    context.close();
    assert!(!log.lock().unwrap().iter().any(|e| e.starts_with("destroy:")));
}

#[test]
fn test_close_destroys_singletons_in_reverse_once() {
    const PACKAGE: &str = "app.lifecycle.close";
    let log = log_for(PACKAGE);

    let mut source = StaticTypeSource::new();
    source
        .add(ComponentDescriptor::<Dependency>::new().in_package(PACKAGE).component("dependency"))
        .add(
            ComponentDescriptor::<Tracked>::with_constructor(|| Ok(tracked_in("app.lifecycle.close")))
                .in_package(PACKAGE)
                .component("first")
                .autowired("dependency"),
        )
        .add(
            ComponentDescriptor::<Tracked>::with_constructor(|| Ok(tracked_in("app.lifecycle.close")))
                .in_package(PACKAGE)
                .component("second")
                .autowired("dependency"),
        );

    let context = ApplicationContext::new(ComponentScan::new(PACKAGE), &source).unwrap();
    context.close();
    context.close();

    let destroyed: Vec<String> = log
        .lock()
        .unwrap()
        .iter()
        .filter(|e| e.starts_with("destroy:"))
        .cloned()
        .collect();
    assert_eq!(destroyed, vec!["destroy:second", "destroy:first"]);

    // The cache survives close
    assert!(context.get_bean_as::<Tracked>("first").is_ok());
}

static POOLS_CREATED: AtomicUsize = AtomicUsize::new(0);
static POOLS_DESTROYED: AtomicUsize = AtomicUsize::new(0);

struct Pool;

impl Bean for Pool {
    fn as_disposable_bean(&self) -> Option<&dyn DisposableBean> {
        Some(self)
    }
}

impl DisposableBean for Pool {
    fn destroy(&self) {
        POOLS_DESTROYED.fetch_add(1, Ordering::SeqCst);
    }
}

fn pool() -> Result<Pool, String> {
    POOLS_CREATED.fetch_add(1, Ordering::SeqCst);
    Ok(Pool)
}

#[test]
fn test_failed_build_destroys_created_singletons() {
    const PACKAGE: &str = "app.lifecycle.abort";

    let mut source = StaticTypeSource::new();
    source
        .add(ComponentDescriptor::<Pool>::with_constructor(pool).in_package(PACKAGE).component("pool"))
        .add(
            ComponentDescriptor::<Dependency>::without_constructor()
                .in_package(PACKAGE)
                .component("broken"),
        );

    let err = ApplicationContext::new(ComponentScan::new(PACKAGE), &source).unwrap_err();

    assert!(matches!(err, DiError::NoDefaultConstructor(_)));
    assert_eq!(POOLS_CREATED.load(Ordering::SeqCst), 1);
    assert_eq!(POOLS_DESTROYED.load(Ordering::SeqCst), 1);
}
