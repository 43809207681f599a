use beluga_sdk::{
    BelugaSdkConfig, BelugaSwapSdk, ContractCall, CreatePoolParams, FeeTierId, LockDuration,
    Network,
};
use rust_decimal_macros::dec;

fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("BelugaSwap SDK - Create Pool");
    println!("============================");

    // environment config when a factory is set, a testnet placeholder otherwise
    let config = if std::env::var_os("BELUGA_FACTORY_ADDRESS").is_some() {
        BelugaSdkConfig::from_env()?
    } else {
        BelugaSdkConfig::new("CFACTORY").with_network(Network::Testnet)
    };
    let sdk = BelugaSwapSdk::new(config)?;
    println!("Network: {} ({})", sdk.rpc_url(), sdk.network_passphrase());

    let result = sdk.factory().create_pool(&CreatePoolParams {
        creator: "GCREATOR".to_string(),
        token_a: "CUSDC".to_string(),
        token_b: "CXLM".to_string(),
        fee_tier: FeeTierId::Volatile,
        creator_fee_percent: dec!(1),
        initial_price: dec!(1.0),
        amount0: dec!(100),
        amount1: dec!(100),
        price_range_lower: dec!(0.95),
        price_range_upper: dec!(1.05),
        lock: Some(LockDuration::Days(dec!(7))),
    })?;

    println!("\n✅ Summary");
    println!("{}", serde_json::to_string_pretty(&result.summary)?);

    println!("\n📦 Contract params for `{}`", result.function());
    println!("{}", serde_json::to_string_pretty(&result.contract_params()?)?);

    println!("\n🔧 Technical");
    println!("{}", serde_json::to_string_pretty(&result.technical)?);

    Ok(())
}
