#![no_main]

use ferrous_ioc::{
    ApplicationContext, Bean, BeanFactory, ComponentDescriptor, ComponentScan, Scope,
    StaticTypeSource,
};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

#[derive(Default)]
struct TestBean;
impl Bean for TestBean {}

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // First byte picks how many beans to register, the rest are split into
    // names and scope markers
    let count = (data[0] % 16) as usize;
    let text = String::from_utf8_lossy(&data[1..]);
    let mut parts = text.split('|');

    let mut source = StaticTypeSource::new();
    let mut expected = Vec::new();
    for _ in 0..count {
        let name = parts.next().unwrap_or("").to_string();
        let marker = parts.next().filter(|m| !m.starts_with('#')).map(str::to_string);
        let scope = Scope::from_marker(marker.as_deref());
        assert_eq!(scope == Scope::Singleton, marker.is_none() || marker.as_deref() == Some("singleton"));

        let mut descriptor = ComponentDescriptor::<TestBean>::new()
            .in_package("fuzz")
            .component(name.clone());
        if let Some(marker) = marker {
            descriptor = descriptor.scope(marker);
        }
        source.add(descriptor);
        expected.push((name, scope));
    }

    let context = match ApplicationContext::new(ComponentScan::new("fuzz"), &source) {
        Ok(context) => context,
        Err(_) => panic!("registering plain beans must not fail"),
    };

    // Last registration for a name wins
    for (name, _) in &expected {
        let scope = expected.iter().rev().find(|(n, _)| n == name).map(|(_, s)| *s);
        let definition = context.bean_definition(name).expect("registered name");
        assert_eq!(Some(definition.scope()), scope);

        let first = context.get_bean(name).expect("lookup of registered name");
        let second = context.get_bean(name).expect("lookup of registered name");
        assert_eq!(Arc::ptr_eq(&first, &second), definition.is_singleton());
    }
});
