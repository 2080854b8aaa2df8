use anchor_client::solana_sdk::signature::Signature;
use anchor_lang::InstructionData;
use hello_world::instruction::Initialize as InitializeIx;
use workspace_client::instruction_discriminator;

use crate::common::{localnet_provider, workspace};

#[test]
fn initialize_carries_only_the_selector() {
    assert_eq!(
        InitializeIx {}.data(),
        instruction_discriminator("initialize").to_vec()
    );
}

#[test]
fn manifest_matches_declared_id() {
    assert_eq!(workspace().program_id("HelloWorld").unwrap(), hello_world::ID);
}

#[tokio::test]
#[ignore = "needs a local validator with the workspace deployed"]
async fn is_initialized() {
    let provider = localnet_provider().await;
    let program = provider
        .program(workspace().program_id("HelloWorld").unwrap())
        .unwrap();

    let tx = workspace_client::initialize(&program).await.unwrap();
    println!("Your transaction signature {tx}");
    assert_ne!(tx, Signature::default());
    assert!(!tx.to_string().is_empty());
}

