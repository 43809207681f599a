use beluga_sdk::{
    BelugaError, BelugaSdkConfig, BelugaSwapSdk, Network, PreviewSwapParams, SwapParams, SwapQuote,
};
use rust_decimal_macros::dec;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("BelugaSwap SDK - Swap");
    println!("=====================");

    let sdk = BelugaSwapSdk::new(
        BelugaSdkConfig::new("CFACTORY")
            .with_network(Network::Testnet)
            .with_pool("CPOOL"),
    )?;
    let Some(pool) = sdk.pool() else {
        anyhow::bail!("no pool configured");
    };

    let params = SwapParams {
        sender: "GTRADER".to_string(),
        token_in: "CUSDC".to_string(),
        amount_in: dec!(10),
        slippage_percent: dec!(0.5),
        price_limit: Some(dec!(0.95)),
    };

    // Quotes come from the pool contract, so this needs a ledger client
    match pool
        .preview_swap(&PreviewSwapParams {
            token_in: params.token_in.clone(),
            amount_in: params.amount_in,
        })
        .await
    {
        Ok(preview) => println!("Preview: {}", serde_json::to_string_pretty(&preview)?),
        Err(BelugaError::Unimplemented(what)) => {
            println!("❌ {what} is not available without a ledger client");
        }
        Err(e) => return Err(e.into()),
    }

    // A quote obtained elsewhere can still be turned into a payload offline
    let quote = SwapQuote {
        amount_out: 99_700_000,
        price_impact_bps: 12,
        sqrt_price_after_x64: 1u128 << 64,
    };
    let swap = pool.build_swap(&params, &quote)?;

    println!("\n✅ Summary");
    println!("{}", serde_json::to_string_pretty(&swap.summary)?);
    println!("\n📦 Contract params");
    println!("{}", serde_json::to_string_pretty(&swap.contract_params)?);

    Ok(())
}
