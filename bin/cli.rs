//! CLI tool for deploying and interacting with the yield vault contracts.

use yield_vaults::factory::vault_factory::VaultFactory;
use yield_vaults::vault::yield_vault::YieldVaultFactory;
use yield_vaults::venue::CustodyVenue;
use yield_vaults::oracle::ManualPriceFeed;
use yield_vaults::tokens::AssetToken;
use odra::prelude::{Address, Addressable};
use odra::host::{HostEnv, NoArgs};
use odra::schema::casper_contract_schema::NamedCLType;
use odra_cli::{
    deploy::DeployScript,
    scenario::{Args, Error, Scenario, ScenarioMetadata},
    CommandArg, ContractProvider, DeployedContractsContainer, DeployerExt,
    OdraCli,
};

/// Deploys the vault deployer and the VaultFactory.
pub struct FactoryDeployScript;

impl DeployScript for FactoryDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use yield_vaults::factory::vault_factory::VaultFactoryInitArgs;

        let deployer = YieldVaultFactory::load_or_deploy(
            &env,
            NoArgs,
            container,
            600_000_000_000 // Gas limit for the vault deployer
        )?;

        let _factory = VaultFactory::load_or_deploy(
            &env,
            VaultFactoryInitArgs {
                vault_deployer: deployer.address().clone(),
            },
            container,
            500_000_000_000 // Gas limit for factory deployment
        )?;

        Ok(())
    }
}

/// Deploys a test asset, a custody venue and a price feed, and registers
/// them with the factory. Requires the factory to be deployed first.
pub struct DevnetDeployScript;

impl DeployScript for DevnetDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        use yield_vaults::tokens::AssetTokenInitArgs;
        use yield_vaults::venue::CustodyVenueInitArgs;

        let mut factory = container.contract_ref::<VaultFactory>(env)?;

        let asset = AssetToken::load_or_deploy(
            &env,
            AssetTokenInitArgs {
                name: String::from("Test USD"),
                symbol: String::from("tUSD"),
                decimals: 6,
            },
            container,
            300_000_000_000
        )?;
        let asset_address = asset.address().clone();

        // One custody venue backs both slots on devnet
        let venue = CustodyVenue::load_or_deploy(
            &env,
            CustodyVenueInitArgs { asset: asset_address },
            container,
            300_000_000_000
        )?;
        let feed = ManualPriceFeed::load_or_deploy(&env, NoArgs, container, 300_000_000_000)?;

        env.set_gas(50_000_000_000);
        factory.set_venue_a_address(venue.address().clone());
        factory.set_venue_b_address(venue.address().clone());
        factory.set_asset_price_feed(asset_address, feed.address().clone());

        Ok(())
    }
}

/// Deploys the factory and the devnet collaborators.
pub struct FullDeployScript;

impl DeployScript for FullDeployScript {
    fn deploy(
        &self,
        env: &HostEnv,
        container: &mut DeployedContractsContainer
    ) -> Result<(), odra_cli::deploy::Error> {
        FactoryDeployScript.deploy(env, container)?;
        DevnetDeployScript.deploy(env, container)?;
        Ok(())
    }
}

/// Scenario to register the caller in the user directory.
pub struct RegisterUserScenario;

impl Scenario for RegisterUserScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new("username", "Username, at most 20 characters", NamedCLType::String),
            CommandArg::new("bio", "Bio, at most 30 characters", NamedCLType::String),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut factory = container.contract_ref::<VaultFactory>(env)?;
        let username = args.get_single::<String>("username")?;
        let bio = args.get_single::<String>("bio")?;

        env.set_gas(50_000_000_000);
        factory.try_register_user(username.clone(), bio)?;

        println!("Registered {}", username);
        Ok(())
    }
}

impl ScenarioMetadata for RegisterUserScenario {
    const NAME: &'static str = "register-user";
    const DESCRIPTION: &'static str = "Registers the caller in the factory's user directory";
}

/// Scenario to create a vault for an asset.
pub struct CreateVaultScenario;

impl Scenario for CreateVaultScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![CommandArg::new(
            "asset",
            "Address of the underlying CEP-18 token",
            NamedCLType::Key,
        )]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut factory = container.contract_ref::<VaultFactory>(env)?;
        let asset = args.get_single::<Address>("asset")?;

        env.set_gas(700_000_000_000);
        let vault = factory.try_create_vault(asset)?;

        println!("Vault created at {:?}", vault);
        println!("Vaults owned by caller: {}", factory.get_user_vaults(env.caller()).len());
        Ok(())
    }
}

impl ScenarioMetadata for CreateVaultScenario {
    const NAME: &'static str = "create-vault";
    const DESCRIPTION: &'static str = "Creates a vault wired to the factory's current venues and price feed";
}

/// Scenario to point a venue slot at a new adapter.
pub struct SetVenueScenario;

impl Scenario for SetVenueScenario {
    fn args(&self) -> Vec<CommandArg> {
        vec![
            CommandArg::new("slot", "Venue slot, A or B", NamedCLType::String),
            CommandArg::new("venue", "Address of the venue adapter", NamedCLType::Key),
        ]
    }

    fn run(
        &self,
        env: &HostEnv,
        container: &DeployedContractsContainer,
        args: Args
    ) -> Result<(), Error> {
        let mut factory = container.contract_ref::<VaultFactory>(env)?;
        let slot = args.get_single::<String>("slot")?;
        let venue = args.get_single::<Address>("venue")?;

        env.set_gas(50_000_000_000);
        match slot.as_str() {
            "A" | "a" => factory.try_set_venue_a_address(venue)?,
            "B" | "b" => factory.try_set_venue_b_address(venue)?,
            other => {
                println!("Unknown venue slot {}, expected A or B", other);
                return Ok(());
            }
        }

        println!("Venue {} set", slot);
        Ok(())
    }
}

impl ScenarioMetadata for SetVenueScenario {
    const NAME: &'static str = "set-venue";
    const DESCRIPTION: &'static str = "Sets the Venue A or Venue B adapter used by new vaults";
}

/// Main function to run the CLI tool.
pub fn main() {
    OdraCli::new()
        .about("CLI tool for the yield vault contracts")
        // Deploy scripts
        .deploy(FactoryDeployScript)
        .deploy(DevnetDeployScript)
        .deploy(FullDeployScript)
        // Contract references
        .contract::<VaultFactory>()
        .contract::<YieldVaultFactory>()
        .contract::<AssetToken>()
        .contract::<CustodyVenue>()
        .contract::<ManualPriceFeed>()
        // Scenarios
        .scenario(RegisterUserScenario)
        .scenario(CreateVaultScenario)
        .scenario(SetVenueScenario)
        .build()
        .run();
}
