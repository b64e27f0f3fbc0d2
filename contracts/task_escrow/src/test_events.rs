extern crate std;

use soroban_sdk::{
    symbol_short,
    testutils::{Address as _, Events},
    vec, Address, IntoVal, String, TryIntoVal,
};

use crate::events::{FundsWithdrawn, Initialized, OwnershipTransferred, TaskCreated, TaskUpdated};
use crate::test::{setup, PRICE};
use crate::UpdatePolicy;

#[test]
fn test_initialized_event() {
    let e = setup();

    let expected_topics = vec![&e.env, symbol_short!("init").into_val(&e.env)];
    let init_event = e
        .env
        .events()
        .all()
        .iter()
        .find(|ev| ev.0 == e.client.address && ev.1 == expected_topics)
        .expect("No init event found");

    let event_data: Initialized = init_event.2.try_into_val(&e.env).unwrap();
    assert_eq!(
        event_data,
        Initialized {
            owner: e.owner.clone(),
            token: e.token.address.clone(),
            fixed_pricing: PRICE,
        }
    );
}

#[test]
fn test_task_created_event() {
    let e = setup();
    let payer = e.new_payer();
    e.pay_from(&payer);
    let idx = e.pay_from(&payer);

    let all_events = e.env.events().all();
    let last_event = all_events.last().expect("No events found");

    // Topic: (symbol_short!("task_new"), idx)
    assert_eq!(last_event.0, e.client.address);
    let expected_topics = vec![
        &e.env,
        symbol_short!("task_new").into_val(&e.env),
        idx.into_val(&e.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TaskCreated = last_event.2.try_into_val(&e.env).unwrap();
    assert_eq!(
        event_data,
        TaskCreated {
            task_id: 1,
            creator: payer.clone(),
            amount: e.price(),
        }
    );
}

#[test]
fn test_task_updated_event() {
    let e = setup();
    let payer = e.new_payer();
    let idx = e.pay_from(&payer);

    e.client.update_task(
        &e.owner,
        &idx,
        &true,
        &false,
        &false,
        &true,
        &String::from_str(&e.env, ""),
        &payer,
    );

    let all_events = e.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![
        &e.env,
        symbol_short!("task_upd").into_val(&e.env),
        idx.into_val(&e.env),
    ];
    assert_eq!(last_event.1, expected_topics);

    let event_data: TaskUpdated = last_event.2.try_into_val(&e.env).unwrap();
    assert_eq!(
        event_data,
        TaskUpdated {
            task_id: idx,
            caller: e.owner.clone(),
            status: true,
        }
    );
}

#[test]
fn test_withdrawn_event() {
    let e = setup();
    let payer = e.new_payer();
    e.pay_from(&payer);
    let recipient = Address::generate(&e.env);

    e.client.withdraw(&e.owner, &recipient, &e.price());

    let all_events = e.env.events().all();
    let last_event = all_events.last().expect("No events found");

    assert_eq!(last_event.0, e.client.address);
    let expected_topics = vec![&e.env, symbol_short!("withdrawn").into_val(&e.env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: FundsWithdrawn = last_event.2.try_into_val(&e.env).unwrap();
    assert_eq!(
        event_data,
        FundsWithdrawn {
            to: recipient,
            amount: e.price(),
        }
    );
}

#[test]
fn test_ownership_transferred_event() {
    let e = setup();
    let new_owner = Address::generate(&e.env);

    e.client.transfer_ownership(&e.owner, &new_owner);

    let all_events = e.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&e.env, symbol_short!("owner_set").into_val(&e.env)];
    assert_eq!(last_event.1, expected_topics);

    let event_data: OwnershipTransferred = last_event.2.try_into_val(&e.env).unwrap();
    assert_eq!(
        event_data,
        OwnershipTransferred {
            previous: e.owner.clone(),
            new_owner,
        }
    );
}

#[test]
fn test_policy_changed_event() {
    let e = setup();

    e.client.set_update_policy(&e.owner, &UpdatePolicy::Public);

    let all_events = e.env.events().all();
    let last_event = all_events.last().expect("No events found");

    let expected_topics = vec![&e.env, symbol_short!("policy").into_val(&e.env)];
    assert_eq!(last_event.1, expected_topics);

    let policy: UpdatePolicy = last_event.2.try_into_val(&e.env).unwrap();
    assert_eq!(policy, UpdatePolicy::Public);
}

#[test]
fn test_audit_sink_changed_event() {
    let e = setup();
    let sink = Address::generate(&e.env);
    let expected_topics = vec![&e.env, symbol_short!("audit_set").into_val(&e.env)];

    e.client.set_audit_sink(&e.owner, &Some(sink.clone()));

    let all_events = e.env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.0, e.client.address);
    assert_eq!(last_event.1, expected_topics);
    let data: Option<Address> = last_event.2.try_into_val(&e.env).unwrap();
    assert_eq!(data, Some(sink));

    e.client.set_audit_sink(&e.owner, &None);

    let all_events = e.env.events().all();
    let last_event = all_events.last().expect("No events found");
    assert_eq!(last_event.1, expected_topics);
    let data: Option<Address> = last_event.2.try_into_val(&e.env).unwrap();
    assert_eq!(data, None);
}
