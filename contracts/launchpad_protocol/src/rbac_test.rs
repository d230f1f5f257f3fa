use soroban_sdk::{testutils::Address as _, Address, Env};

use crate::test::contract_error;
use crate::test_whitelist::MockWhitelist;
use crate::{Error, LaunchpadProtocol, LaunchpadProtocolClient, Role};

// ─── Helpers ─────────────────────────────────────────────

fn setup() -> (Env, LaunchpadProtocolClient<'static>, Address) {
    let env = Env::default();
    env.mock_all_auths();
    let contract_id = env.register(LaunchpadProtocol, ());
    let client = LaunchpadProtocolClient::new(&env, &contract_id);
    let whitelist = env.register(MockWhitelist, ());
    (env, client, whitelist)
}

fn setup_with_init() -> (Env, LaunchpadProtocolClient<'static>, Address) {
    let (env, client, whitelist) = setup();
    let super_admin = Address::generate(&env);
    client.init(&super_admin, &whitelist);
    (env, client, super_admin)
}

// ─── 1. Initialisation ───────────────────────────────────

#[test]
fn test_init_sets_super_admin_and_defaults() {
    let (env, client, whitelist) = setup();
    let super_admin = Address::generate(&env);
    client.init(&super_admin, &whitelist);

    assert!(client.has_role(&super_admin, &Role::SuperAdmin));
    assert_eq!(client.role_of(&super_admin), Some(Role::SuperAdmin));
    assert_eq!(client.get_whitelist_contract(), Some(whitelist));
    assert_eq!(
        client.get_liquidated_damage_config().default_proportion,
        crate::DEFAULT_LIQUIDATED_DAMAGE_PROPORTION
    );
}

#[test]
#[should_panic(expected = "Error(Contract, #30)")]
fn test_init_twice_panics() {
    let (env, client, super_admin) = setup_with_init();
    client.init(&super_admin, &Address::generate(&env));
}

#[test]
#[should_panic(expected = "Error(Contract, #31)")]
fn test_config_read_before_init_panics() {
    let (_env, client, _) = setup();
    client.get_liquidated_damage_config();
}

// ─── 2. grant_role ───────────────────────────────────────

#[test]
fn test_super_admin_can_grant_admin() {
    let (env, client, super_admin) = setup_with_init();
    let admin = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    assert!(client.has_role(&admin, &Role::Admin));
}

#[test]
fn test_admin_can_grant_admin() {
    let (env, client, super_admin) = setup_with_init();
    let admin = Address::generate(&env);
    let operator = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.grant_role(&admin, &operator, &Role::Admin);
    assert!(client.has_role(&operator, &Role::Admin));
}

#[test]
fn test_admin_cannot_grant_super_admin() {
    let (env, client, super_admin) = setup_with_init();
    let admin = Address::generate(&env);
    let impostor = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    let result = client.try_grant_role(&admin, &impostor, &Role::SuperAdmin);
    assert_eq!(result, Err(Ok(contract_error(Error::NotAuthorized))));
    assert_eq!(client.role_of(&impostor), None);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn test_no_role_cannot_grant() {
    let (env, client, _) = setup_with_init();
    let nobody = Address::generate(&env);
    let target = Address::generate(&env);
    client.grant_role(&nobody, &target, &Role::Admin);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn test_super_admin_cannot_be_demoted() {
    let (env, client, super_admin) = setup_with_init();
    let admin = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.grant_role(&admin, &super_admin, &Role::Admin);
}

// ─── 3. revoke_role ──────────────────────────────────────

#[test]
fn test_super_admin_can_revoke_admin() {
    let (env, client, super_admin) = setup_with_init();
    let admin = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.revoke_role(&super_admin, &admin);
    assert!(!client.has_role(&admin, &Role::Admin));
    assert_eq!(client.role_of(&admin), None);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn test_cannot_revoke_super_admin_via_revoke_role() {
    let (_env, client, super_admin) = setup_with_init();
    client.revoke_role(&super_admin, &super_admin);
}

#[test]
fn test_revoke_no_role_is_noop() {
    let (env, client, super_admin) = setup_with_init();
    let nobody = Address::generate(&env);
    client.revoke_role(&super_admin, &nobody);
    assert_eq!(client.role_of(&nobody), None);
}

#[test]
fn test_revoked_admin_loses_access() {
    let (env, client, super_admin) = setup_with_init();
    let admin = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.set_liquidated_damage_config(&admin, &20_000_000);
    client.revoke_role(&super_admin, &admin);

    let result = client.try_set_liquidated_damage_config(&admin, &30_000_000);
    assert_eq!(result, Err(Ok(contract_error(Error::NotAuthorized))));
    assert_eq!(
        client.get_liquidated_damage_config().default_proportion,
        20_000_000
    );
}

// ─── 4. transfer_super_admin ─────────────────────────────

#[test]
fn test_transfer_super_admin() {
    let (env, client, old_super) = setup_with_init();
    let new_super = Address::generate(&env);
    client.transfer_super_admin(&old_super, &new_super);
    assert!(client.has_role(&new_super, &Role::SuperAdmin));
    assert_eq!(client.role_of(&old_super), None);
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn test_admin_cannot_transfer_super_admin() {
    let (env, client, super_admin) = setup_with_init();
    let admin = Address::generate(&env);
    client.grant_role(&super_admin, &admin, &Role::Admin);
    client.transfer_super_admin(&admin, &admin);
}

// ─── 5. Configuration gates ──────────────────────────────

#[test]
fn test_admin_can_replace_whitelist_contract() {
    let (env, client, super_admin) = setup_with_init();
    let replacement = Address::generate(&env);
    client.set_whitelist_contract(&super_admin, &replacement);
    assert_eq!(client.get_whitelist_contract(), Some(replacement));
}

#[test]
#[should_panic(expected = "Error(Contract, #1)")]
fn test_no_role_cannot_set_whitelist_contract() {
    let (env, client, _) = setup_with_init();
    let nobody = Address::generate(&env);
    client.set_whitelist_contract(&nobody, &Address::generate(&env));
}

#[test]
#[should_panic(expected = "Error(Contract, #17)")]
fn test_liquidated_damage_proportion_is_bounded() {
    let (_env, client, super_admin) = setup_with_init();
    client.set_liquidated_damage_config(&super_admin, &(crate::PROPORTION_SCALE + 1));
}

#[test]
fn test_full_proportion_is_accepted() {
    let (_env, client, super_admin) = setup_with_init();
    client.set_liquidated_damage_config(&super_admin, &crate::PROPORTION_SCALE);
    assert_eq!(
        client.get_liquidated_damage_config().default_proportion,
        crate::PROPORTION_SCALE
    );
}
