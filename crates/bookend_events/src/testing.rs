//! In-crate test host.
//!
//! `Probe<C>` is a minimal [`ObservableModel`] whose listener store lives in a
//! thread-local, so every `#[test]` (one thread each) sees a fresh store.
//! Distinct class markers `C` keep tests apart in the process-wide dynamic
//! registry.

use core::any::{Any, TypeId};
use core::marker::PhantomData;
use std::cell::RefCell;

use hashbrown::HashMap;

use crate::class::ModelClassId;
use crate::config::HooksConfig;
use crate::error::HookError;
use crate::host::ObservableModel;
use crate::listener::{Listener, Verdict};
use crate::name::EventName;
use crate::observable::ObservableEventSet;
use crate::registration::BeforeAndAfterEvents;

thread_local! {
    static STORES: RefCell<HashMap<TypeId, Box<dyn Any>>> = RefCell::new(HashMap::new());
}

/// Test class settings.
pub(crate) trait ProbeClass: 'static {
    const DECLARED: &'static [&'static str] = &[];
    const CONFIG: HooksConfig = HooksConfig::new();
}

pub(crate) struct Probe<C> {
    observable: ObservableEventSet,
    /// Every base firing as `(name, halt)`, in order.
    pub(crate) fired: Vec<(String, bool)>,
    /// Markers pushed by listeners.
    pub(crate) log: Vec<String>,
    _class: PhantomData<C>,
}

impl<C: ProbeClass> Probe<C> {
    /// Builds an instance the way a host constructor would.
    pub(crate) fn new() -> Self {
        let mut probe = Self::bare();
        probe.initialize_before_and_after_events();
        probe
    }

    /// Builds an instance without running the initializer.
    pub(crate) fn bare() -> Self {
        Self {
            observable: ObservableEventSet::new(),
            fired: Vec::new(),
            log: Vec::new(),
            _class: PhantomData,
        }
    }

    pub(crate) fn listeners_for(name: &str) -> Vec<Listener<Self>> {
        with_store::<C, _>(|store| {
            store
                .iter()
                .filter(|(event, _)| event == name)
                .map(|(_, listener)| listener.clone())
                .collect()
        })
    }
}

fn with_store<C: ProbeClass, R>(
    f: impl FnOnce(&mut Vec<(EventName, Listener<Probe<C>>)>) -> R,
) -> R {
    STORES.with(|stores| {
        let mut stores = stores.borrow_mut();
        let store = stores
            .entry(TypeId::of::<C>())
            .or_insert_with(|| Box::new(Vec::<(EventName, Listener<Probe<C>>)>::new()));
        let store = store
            .downcast_mut::<Vec<(EventName, Listener<Probe<C>>)>>()
            .expect("store type is keyed by class");
        f(store)
    })
}

impl<C: ProbeClass> ObservableModel for Probe<C> {
    fn class_id() -> ModelClassId {
        ModelClassId::of::<C>()
    }

    fn declared_events() -> &'static [&'static str] {
        C::DECLARED
    }

    fn hooks_config() -> HooksConfig {
        C::CONFIG
    }

    fn observable_events(&self) -> &ObservableEventSet {
        &self.observable
    }

    fn add_observable_events(&mut self, names: ObservableEventSet) {
        self.observable.extend(names.iter().cloned());
    }

    fn register_model_event(name: EventName, listener: Listener<Self>) {
        with_store::<C, _>(|store| store.push((name, listener)));
    }

    fn fire_model_event(&mut self, name: &EventName, halt: bool) -> Result<Verdict, HookError> {
        self.fired.push((name.to_string(), halt));

        for listener in Self::listeners_for(name.as_str()) {
            if listener.call(self)?.is_stop() && halt {
                return Ok(Verdict::Stop);
            }
        }
        Ok(Verdict::Proceed)
    }
}

/// Declares a fresh probe class marker with optional settings.
macro_rules! probe_class {
    ($name:ident) => {
        struct $name;
        impl $crate::testing::ProbeClass for $name {}
    };
    ($name:ident, declared: $declared:expr) => {
        struct $name;
        impl $crate::testing::ProbeClass for $name {
            const DECLARED: &'static [&'static str] = $declared;
        }
    };
    ($name:ident, config: $config:expr) => {
        struct $name;
        impl $crate::testing::ProbeClass for $name {
            const CONFIG: $crate::config::HooksConfig = $config;
        }
    };
}

pub(crate) use probe_class;
