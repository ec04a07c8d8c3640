use std::collections::{HashMap, VecDeque};
use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use tarifa_core::connector::{EventProvider, ObservationProvider, PriceWriter, StoreConnector};
use tarifa_core::{Event, ObservationId, PriceObservation, PropertyRef, TarifaError};

/// Instruction for how a method should behave for a given input.
#[derive(Clone)]
pub enum MockBehavior<T> {
    /// Return the provided value immediately.
    Return(T),
    /// Fail immediately with the provided error.
    Fail(TarifaError),
    /// Hang indefinitely (simulate a timeout).
    Hang,
}

/// Queue of behaviors; the last one repeats once the others are consumed.
struct Script<T>(VecDeque<MockBehavior<T>>);

impl<T: Clone> Script<T> {
    fn next(&mut self) -> Option<MockBehavior<T>> {
        if self.0.len() > 1 {
            self.0.pop_front()
        } else {
            self.0.front().cloned()
        }
    }
}

#[derive(Default)]
struct InternalState {
    observation_rules: HashMap<PropertyRef, Script<Vec<PriceObservation>>>,
    event_rule: Option<MockBehavior<Vec<Event>>>,
    update_rules: HashMap<ObservationId, MockBehavior<()>>,
    observation_calls: HashMap<PropertyRef, usize>,
    updates: Vec<(ObservationId, Decimal)>,
}

/// Controller handle used by tests to drive the dynamic mock from the outside.
pub struct DynamicMockController {
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockController {
    /// Set the behavior for `list_observations` calls for a property.
    pub async fn set_observations_behavior(
        &self,
        property: PropertyRef,
        behavior: MockBehavior<Vec<PriceObservation>>,
    ) {
        self.script_observations(property, vec![behavior]).await;
    }

    /// Script successive `list_observations` results for a property.
    ///
    /// Each call consumes one behavior; the last one repeats.
    pub async fn script_observations(
        &self,
        property: PropertyRef,
        behaviors: Vec<MockBehavior<Vec<PriceObservation>>>,
    ) {
        let mut guard = self.state.lock().await;
        guard
            .observation_rules
            .insert(property, Script(behaviors.into()));
    }

    /// Set the behavior for `list_events` calls.
    pub async fn set_events_behavior(&self, behavior: MockBehavior<Vec<Event>>) {
        let mut guard = self.state.lock().await;
        guard.event_rule = Some(behavior);
    }

    /// Set the behavior for price updates of one observation.
    ///
    /// Observations without a rule accept every update.
    pub async fn set_update_behavior(&self, id: ObservationId, behavior: MockBehavior<()>) {
        let mut guard = self.state.lock().await;
        guard.update_rules.insert(id, behavior);
    }

    /// Return a copy of the acknowledged price updates, in completion order.
    pub async fn updates(&self) -> Vec<(ObservationId, Decimal)> {
        self.state.lock().await.updates.clone()
    }

    /// Number of `list_observations` calls seen for a property.
    pub async fn observation_calls(&self, property: &PropertyRef) -> usize {
        let guard = self.state.lock().await;
        guard.observation_calls.get(property).copied().unwrap_or(0)
    }

    /// Clear all configured behaviors and logs.
    pub async fn clear_all_behaviors(&self) {
        let mut guard = self.state.lock().await;
        guard.observation_rules.clear();
        guard.event_rule = None;
        guard.update_rules.clear();
        guard.observation_calls.clear();
        guard.updates.clear();
    }
}

/// A store that defers all behavior to an external controller.
pub struct DynamicMockStore {
    name: &'static str,
    writable: bool,
    state: Arc<Mutex<InternalState>>,
}

impl DynamicMockStore {
    /// Create a new dynamic mock store and its controller.
    #[must_use]
    pub fn new_with_controller(
        name: &'static str,
    ) -> (Arc<dyn StoreConnector>, DynamicMockController) {
        Self::build(name, true)
    }

    /// Like [`DynamicMockStore::new_with_controller`], but without the price-writer role.
    #[must_use]
    pub fn read_only_with_controller(
        name: &'static str,
    ) -> (Arc<dyn StoreConnector>, DynamicMockController) {
        Self::build(name, false)
    }

    fn build(
        name: &'static str,
        writable: bool,
    ) -> (Arc<dyn StoreConnector>, DynamicMockController) {
        let state = Arc::new(Mutex::new(InternalState::default()));
        let controller = DynamicMockController {
            state: Arc::clone(&state),
        };
        let me = Arc::new(Self {
            name,
            writable,
            state,
        });
        (me as Arc<dyn StoreConnector>, controller)
    }
}

impl StoreConnector for DynamicMockStore {
    fn name(&self) -> &'static str {
        self.name
    }

    fn vendor(&self) -> &'static str {
        "DynamicMock"
    }

    fn as_observation_provider(&self) -> Option<&dyn ObservationProvider> {
        Some(self as &dyn ObservationProvider)
    }

    fn as_event_provider(&self) -> Option<&dyn EventProvider> {
        Some(self as &dyn EventProvider)
    }

    fn as_price_writer(&self) -> Option<&dyn PriceWriter> {
        self.writable.then_some(self as &dyn PriceWriter)
    }
}

#[async_trait]
impl ObservationProvider for DynamicMockStore {
    async fn list_observations(
        &self,
        property: &PropertyRef,
    ) -> Result<Vec<PriceObservation>, TarifaError> {
        // Acquire behavior snapshot without holding the lock across await points
        let behavior = {
            let mut guard = self.state.lock().await;
            *guard.observation_calls.entry(property.clone()).or_default() += 1;
            guard
                .observation_rules
                .get_mut(property)
                .and_then(Script::next)
        };

        match behavior {
            Some(MockBehavior::Return(rows)) => Ok(rows),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Err(TarifaError::not_found(format!("observations for {property}"))),
        }
    }
}

#[async_trait]
impl EventProvider for DynamicMockStore {
    async fn list_events(&self, _location: Option<&str>) -> Result<Vec<Event>, TarifaError> {
        let behavior = self.state.lock().await.event_rule.clone();
        match behavior {
            Some(MockBehavior::Return(events)) => Ok(events),
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl PriceWriter for DynamicMockStore {
    async fn update_observation_price(
        &self,
        id: &ObservationId,
        price: Decimal,
    ) -> Result<(), TarifaError> {
        let behavior = self.state.lock().await.update_rules.get(id).cloned();
        match behavior {
            None | Some(MockBehavior::Return(())) => {
                self.state.lock().await.updates.push((id.clone(), price));
                Ok(())
            }
            Some(MockBehavior::Fail(e)) => Err(e),
            Some(MockBehavior::Hang) => {
                std::future::pending::<()>().await;
                unreachable!()
            }
        }
    }
}
