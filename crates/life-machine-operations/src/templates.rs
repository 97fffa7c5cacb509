//! Files scaffolded into a project by setup mode.

/// CI workflow that runs life-machine on dependency-bot pull requests and
/// auto-merges them once the package is published.
pub const WORKFLOW_TEMPLATE: &str = r#"name: Life Machine

on:
  pull_request:
    branches: [ main, master ]

permissions:
  pull-requests: write

jobs:
  publish:
    if: ${{ github.actor == 'dependabot[bot]' }}
    runs-on: ubuntu-latest

    strategy:
      matrix:
        node-version: [18.x]
        # See supported Node.js release schedule at https://nodejs.org/en/about/releases/

    steps:
    - uses: actions/checkout@v4
    - name: Use Node.js ${{ matrix.node-version }}
      uses: actions/setup-node@v4
      with:
        node-version: ${{ matrix.node-version }}
        cache: 'npm'
    # Installs npm packages
    - run: npm ci
    # Installs Life Machine
    - run: cargo install life-machine --locked
    # Runs Life Machine
    - run: life-machine ?workflow ${{ secrets.LM_NPM_TOKEN }} ${{ secrets.GITHUB_TOKEN }} ${{ secrets.LM_DISCORD_TOKEN }}
      if: ${{ success() }}
    # Merge PR
    - name: Dependabot metadata
      id: metadata
      uses: dependabot/fetch-metadata@v2
      with:
        github-token: "${{ secrets.GITHUB_TOKEN }}"
      if: ${{ success() }}
    - name: Merge the PR
      run: gh pr merge ${{ github.event.pull_request.number }} --auto --squash --merge-message "Merged by workflow"
      env:
        GITHUB_TOKEN: ${{ secrets.GITHUB_TOKEN }}
      if: ${{ success() }}
"#;

pub const DEPENDABOT_TEMPLATE: &str = r#"# To get started with Dependabot version updates, you'll need to specify which
# package ecosystems to update and where the package manifests are located.
# Please see the documentation for all configuration options:
# https://docs.github.com/github/administering-a-repository/configuration-options-for-dependency-updates

version: 2
updates:
  - package-ecosystem: "npm" # See documentation for possible values
    directory: "/" # Location of package manifests
    schedule:
      interval: "daily"
"#;
