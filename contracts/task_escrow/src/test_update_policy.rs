extern crate std;

use soroban_sdk::{testutils::Address as _, Address, String};

use crate::test::{setup, setup_with_policy};
use crate::{Error, UpdatePolicy};

#[test]
fn test_owner_only_rejects_stranger() {
    let e = setup();
    let payer = e.new_payer();
    e.pay_from(&payer);
    let before = e.client.task(&0);

    let res = e.client.try_update_task(
        &payer,
        &0,
        &true,
        &true,
        &true,
        &true,
        &String::from_str(&e.env, "hijacked"),
        &payer,
    );
    assert_eq!(res, Err(Ok(Error::NotAuthorized.into())));
    assert_eq!(e.client.task(&0), before);
}

#[test]
fn test_owner_only_authorization_precedes_lookup() {
    let e = setup();
    let stranger = Address::generate(&e.env);

    let res = e.client.try_update_task(
        &stranger,
        &42,
        &true,
        &false,
        &false,
        &true,
        &String::from_str(&e.env, ""),
        &stranger,
    );
    assert_eq!(res, Err(Ok(Error::NotAuthorized.into())));
}

#[test]
fn test_public_policy_accepts_anyone() {
    let e = setup_with_policy(UpdatePolicy::Public);
    let payer = e.new_payer();
    e.pay_from(&payer);
    let stranger = Address::generate(&e.env);

    e.client.update_task(
        &stranger,
        &0,
        &false,
        &true,
        &false,
        &false,
        &String::from_str(&e.env, "picked up by stranger"),
        &stranger,
    );

    let task = e.client.task(&0);
    assert_eq!(task.details, String::from_str(&e.env, "picked up by stranger"));
    assert_eq!(task.creator, payer);
}

#[test]
fn test_public_policy_still_checks_range() {
    let e = setup_with_policy(UpdatePolicy::Public);
    let stranger = Address::generate(&e.env);

    let res = e.client.try_update_task(
        &stranger,
        &0,
        &true,
        &false,
        &false,
        &true,
        &String::from_str(&e.env, ""),
        &stranger,
    );
    assert_eq!(res, Err(Ok(Error::TaskNotFound.into())));
}

#[test]
fn test_owner_switches_policy() {
    let e = setup();
    let payer = e.new_payer();
    e.pay_from(&payer);

    e.client.set_update_policy(&e.owner, &UpdatePolicy::Public);
    assert_eq!(e.client.agent().update_policy, UpdatePolicy::Public);
    e.client.update_task(
        &payer,
        &0,
        &true,
        &false,
        &false,
        &true,
        &String::from_str(&e.env, ""),
        &payer,
    );
    assert!(e.client.task(&0).status);

    e.client.set_update_policy(&e.owner, &UpdatePolicy::OwnerOnly);
    let res = e.client.try_update_task(
        &payer,
        &0,
        &true,
        &false,
        &false,
        &false,
        &String::from_str(&e.env, ""),
        &payer,
    );
    assert_eq!(res, Err(Ok(Error::NotAuthorized.into())));
    assert!(e.client.task(&0).status);
}

#[test]
fn test_non_owner_cannot_change_policy() {
    let e = setup();
    let stranger = Address::generate(&e.env);

    let res = e.client.try_set_update_policy(&stranger, &UpdatePolicy::Public);
    assert_eq!(res, Err(Ok(Error::NotAuthorized.into())));
    assert_eq!(e.client.agent().update_policy, UpdatePolicy::OwnerOnly);
}
